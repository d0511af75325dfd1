//! ResetPasswordHandler - Records a password reset request.
//!
//! The email is shape-checked, then handed to storage. No token is issued
//! and the outcome is the same whether or not the email is registered.

use std::sync::Arc;

use crate::application::StorageDeadline;
use crate::domain::identity::{Email, IdentityError};
use crate::ports::IdentityRepository;

use super::storage_failure;

/// Command to request a password reset.
#[derive(Debug, Clone)]
pub struct ResetPasswordCommand {
    pub email: String,
}

/// Handler for password reset requests.
pub struct ResetPasswordHandler {
    repository: Arc<dyn IdentityRepository>,
    deadline: StorageDeadline,
}

impl ResetPasswordHandler {
    pub fn new(repository: Arc<dyn IdentityRepository>, deadline: StorageDeadline) -> Self {
        Self {
            repository,
            deadline,
        }
    }

    pub async fn handle(&self, cmd: ResetPasswordCommand) -> Result<(), IdentityError> {
        let email = Email::parse(&cmd.email)?;

        self.deadline
            .run("reset_password", self.repository.reset_password(&email))
            .await
            .map_err(|e| storage_failure("reset_password", e))?;

        tracing::info!("password reset requested");
        Ok(())
    }
}
