//! IdentityService - The identity operations exposed to callers.
//!
//! Stateless between calls. The signing secret arrives inside the injected
//! codec, so tests can build services with distinct secrets side by side.

use std::sync::Arc;

use crate::application::StorageDeadline;
use crate::domain::foundation::IdentityId;
use crate::domain::identity::{IdentityError, IssuedToken};
use crate::ports::{IdentityRepository, TokenCodec};

use super::{
    CreateAccountCommand, CreateAccountHandler, CreateAccountResult, LoginCommand, LoginHandler,
    ResetPasswordCommand, ResetPasswordHandler, VerifyTokenHandler,
};

/// Facade over the identity handlers.
#[derive(Clone)]
pub struct IdentityService {
    repository: Arc<dyn IdentityRepository>,
    codec: Arc<dyn TokenCodec>,
    deadline: StorageDeadline,
}

impl IdentityService {
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

    /// Registers a new identity. `Ok` means it was created.
    pub async fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CreateAccountResult, IdentityError> {
        CreateAccountHandler::new(self.repository.clone(), self.deadline)
            .handle(CreateAccountCommand {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
    }

    /// Exchanges a credential for a signed token.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, IdentityError> {
        LoginHandler::new(self.repository.clone(), self.codec.clone(), self.deadline)
            .handle(LoginCommand {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
    }

    /// Resolves a token to its subject, or `None` if it is not valid.
    pub fn verify_token(&self, token: &str) -> Option<IdentityId> {
        VerifyTokenHandler::new(self.codec.clone()).handle(token)
    }

    /// Records a password reset request for `email`.
    pub async fn reset_password(&self, email: &str) -> Result<(), IdentityError> {
        ResetPasswordHandler::new(self.repository.clone(), self.deadline)
            .handle(ResetPasswordCommand {
                email: email.to_string(),
            })
            .await
    }
}
