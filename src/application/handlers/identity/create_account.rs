//! CreateAccountHandler - Command handler for registering a new identity.

use std::sync::Arc;

use crate::application::StorageDeadline;
use crate::domain::foundation::IdentityId;
use crate::domain::identity::{Credential, IdentityError};
use crate::ports::IdentityRepository;

use super::storage_failure;

/// Command to register an email/password identity.
#[derive(Clone)]
pub struct CreateAccountCommand {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for CreateAccountCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateAccountCommand")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccountResult {
    pub identity_id: IdentityId,
}

/// Handler for registering identities.
///
/// The existence check gives a clean rejection in the common case. The
/// storage uniqueness constraint still decides a concurrent race, and its
/// rejection surfaces as `IdentityAlreadyExists` too.
pub struct CreateAccountHandler {
    repository: Arc<dyn IdentityRepository>,
    deadline: StorageDeadline,
}

impl CreateAccountHandler {
    pub fn new(repository: Arc<dyn IdentityRepository>, deadline: StorageDeadline) -> Self {
        Self {
            repository,
            deadline,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateAccountCommand,
    ) -> Result<CreateAccountResult, IdentityError> {
        let credential = Credential::parse(&cmd.email, cmd.password)?;

        let existing = self
            .deadline
            .run(
                "identity_by_email",
                self.repository.identity_by_email(&credential.email),
            )
            .await
            .map_err(|e| storage_failure("identity_by_email", e))?;
        if existing.is_some() {
            tracing::info!("sign-up rejected: email already registered");
            return Err(IdentityError::IdentityAlreadyExists);
        }

        let identity_id = self
            .deadline
            .run(
                "create_identity",
                self.repository
                    .create_identity(&credential.email, &credential.password),
            )
            .await
            .map_err(|e| storage_failure("create_identity", e))?;

        tracing::info!(identity_id = %identity_id, "identity created");
        Ok(CreateAccountResult { identity_id })
    }
}
