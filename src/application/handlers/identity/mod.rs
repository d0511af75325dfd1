//! Identity handlers.
//!
//! Credential shape checks run before any storage call. Storage failures
//! other than the business rejections storage may report are logged here
//! with full detail and collapse to `IdentityError::Infrastructure`.

mod create_account;
mod login;
mod reset_password;
mod service;
mod verify_token;

pub use create_account::{CreateAccountCommand, CreateAccountHandler, CreateAccountResult};
pub use login::{LoginCommand, LoginHandler};
pub use reset_password::{ResetPasswordCommand, ResetPasswordHandler};
pub use service::IdentityService;
pub use verify_token::VerifyTokenHandler;

use crate::domain::foundation::DomainError;
use crate::domain::identity::IdentityError;

fn storage_failure(operation: &'static str, err: DomainError) -> IdentityError {
    if err.code.is_infrastructure() {
        tracing::error!(
            operation,
            code = %err.code,
            details = ?err.details,
            "identity storage failed: {}",
            err.message
        );
    }
    IdentityError::from(err)
}
