//! LoginHandler - Exchanges a credential for a bearer token.

use std::sync::Arc;

use crate::application::StorageDeadline;
use crate::domain::identity::{Credential, IdentityError, IssuedToken};
use crate::ports::{IdentityRepository, TokenCodec};

use super::storage_failure;

/// Command to log in with an email and secret.
#[derive(Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Handler for credential login.
///
/// An unknown email and a wrong secret both fail with
/// `IdentityDoesNotExist`, so the response never reveals which accounts exist.
pub struct LoginHandler {
    repository: Arc<dyn IdentityRepository>,
    codec: Arc<dyn TokenCodec>,
    deadline: StorageDeadline,
}

impl LoginHandler {
    pub fn new(
        repository: Arc<dyn IdentityRepository>,
        codec: Arc<dyn TokenCodec>,
        deadline: StorageDeadline,
    ) -> Self {
        Self {
            repository,
            codec,
            deadline,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<IssuedToken, IdentityError> {
        let credential = Credential::parse(&cmd.email, cmd.password)?;

        let identity = self
            .deadline
            .run(
                "identity_by_credential",
                self.repository
                    .identity_by_credential(&credential.email, &credential.password),
            )
            .await
            .map_err(|e| storage_failure("identity_by_credential", e))?;

        let Some(identity_id) = identity else {
            tracing::info!(reason = "no matching credential", "login rejected");
            return Err(IdentityError::IdentityDoesNotExist);
        };

        let issued = self.codec.issue(&identity_id).map_err(|e| {
            tracing::error!(identity_id = %identity_id, error = %e, "token signing failed");
            IdentityError::TokenIssuanceFailed
        })?;

        tracing::info!(identity_id = %identity_id, "login succeeded");
        Ok(issued)
    }
}
