//! PostgreSQL implementation of IdentityRepository.
//!
//! Email uniqueness is the `identities_email_key` constraint. A concurrent
//! sign-up that loses the race fails on insert, not on the earlier lookup.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::adapters::auth::Argon2PasswordHasher;
use crate::domain::foundation::{DomainError, ErrorCode, IdentityId};
use crate::domain::identity::{Email, Password};
use crate::ports::IdentityRepository;

const EMAIL_UNIQUE_CONSTRAINT: &str = "identities_email_key";

/// PostgreSQL implementation of the IdentityRepository port.
pub struct PostgresIdentityRepository {
    pool: PgPool,
    hasher: Argon2PasswordHasher,
}

impl PostgresIdentityRepository {
    pub fn new(pool: PgPool, hasher: Argon2PasswordHasher) -> Self {
        Self { pool, hasher }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CredentialRow {
    identity_id: String,
    password_hash: String,
}

fn parse_identity_id(raw: String) -> Result<IdentityId, DomainError> {
    IdentityId::new(raw).map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid identity_id: {}", e))
    })
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn create_identity(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<IdentityId, DomainError> {
        let id = IdentityId::generate();
        let password_hash = self.hasher.hash(password).await?;

        sqlx::query(
            r#"
            INSERT INTO identities (identity_id, email, password_hash)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id.as_str())
        .bind(email.as_str())
        .bind(&password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT) {
                    return DomainError::new(
                        ErrorCode::IdentityAlreadyExists,
                        "An identity is already registered for this email",
                    );
                }
            }
            DomainError::database(format!("Failed to create identity: {}", e))
        })?;

        Ok(id)
    }

    async fn identity_by_email(&self, email: &Email) -> Result<Option<IdentityId>, DomainError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT identity_id FROM identities WHERE email = $1")
                .bind(email.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database(format!("Failed to find identity: {}", e)))?;

        row.map(|(id,)| parse_identity_id(id)).transpose()
    }

    async fn identity_by_credential(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Option<IdentityId>, DomainError> {
        let row: Option<CredentialRow> = sqlx::query_as(
            "SELECT identity_id, password_hash FROM identities WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find credential: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        if self.hasher.verify(password, &row.password_hash).await? {
            parse_identity_id(row.identity_id).map(Some)
        } else {
            Ok(None)
        }
    }

    async fn reset_password(&self, email: &Email) -> Result<(), DomainError> {
        sqlx::query("UPDATE identities SET reset_requested_at = now() WHERE email = $1")
            .bind(email.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::database(format!("Failed to record password reset: {}", e))
            })?;

        Ok(())
    }
}
