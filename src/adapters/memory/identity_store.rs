//! In-memory identity store for tests and single-process deployments.
//!
//! Emails are unique keys of one map behind a single lock, so the
//! uniqueness check and the insert happen as one step.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::adapters::auth::Argon2PasswordHasher;
use crate::domain::foundation::{DomainError, ErrorCode, IdentityId, Timestamp};
use crate::domain::identity::{Email, Password};
use crate::ports::IdentityRepository;

#[derive(Debug, Clone)]
struct IdentityRecord {
    id: IdentityId,
    password_hash: String,
    reset_requested_at: Option<Timestamp>,
}

/// Identity store keyed by normalized email.
#[derive(Debug, Clone)]
pub struct InMemoryIdentityStore {
    identities: Arc<RwLock<HashMap<Email, IdentityRecord>>>,
    hasher: Argon2PasswordHasher,
}

impl InMemoryIdentityStore {
    pub fn new(hasher: Argon2PasswordHasher) -> Self {
        Self {
            identities: Arc::new(RwLock::new(HashMap::new())),
            hasher,
        }
    }

    /// Inserts an identity with a caller-chosen id.
    ///
    /// # Errors
    ///
    /// `IdentityAlreadyExists` if the email is already registered.
    pub async fn seed_identity(
        &self,
        id: IdentityId,
        email: &Email,
        password: &Password,
    ) -> Result<(), DomainError> {
        let password_hash = self.hasher.hash(password).await?;
        self.insert(email, IdentityRecord {
            id,
            password_hash,
            reset_requested_at: None,
        })
        .await
        .map(|_| ())
    }

    /// When a reset was last requested for `email`, if ever.
    pub async fn reset_requested_at(&self, email: &Email) -> Option<Timestamp> {
        self.identities
            .read()
            .await
            .get(email)
            .and_then(|record| record.reset_requested_at)
    }

    /// Number of registered identities.
    pub async fn len(&self) -> usize {
        self.identities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn insert(&self, email: &Email, record: IdentityRecord) -> Result<IdentityId, DomainError> {
        let mut identities = self.identities.write().await;
        if identities.contains_key(email) {
            return Err(DomainError::new(
                ErrorCode::IdentityAlreadyExists,
                "an identity is already registered for this email",
            ));
        }
        let id = record.id.clone();
        identities.insert(email.clone(), record);
        Ok(id)
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityStore {
    async fn create_identity(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<IdentityId, DomainError> {
        let password_hash = self.hasher.hash(password).await?;
        self.insert(email, IdentityRecord {
            id: IdentityId::generate(),
            password_hash,
            reset_requested_at: None,
        })
        .await
    }

    async fn identity_by_email(&self, email: &Email) -> Result<Option<IdentityId>, DomainError> {
        Ok(self
            .identities
            .read()
            .await
            .get(email)
            .map(|record| record.id.clone()))
    }

    async fn identity_by_credential(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Option<IdentityId>, DomainError> {
        let record = self.identities.read().await.get(email).cloned();
        let Some(record) = record else {
            return Ok(None);
        };

        if self.hasher.verify(password, &record.password_hash).await? {
            Ok(Some(record.id))
        } else {
            Ok(None)
        }
    }

    async fn reset_password(&self, email: &Email) -> Result<(), DomainError> {
        if let Some(record) = self.identities.write().await.get_mut(email) {
            record.reset_requested_at = Some(Timestamp::now());
        }
        Ok(())
    }
}
