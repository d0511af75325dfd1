//! Identity-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidEmail | 400 |
//! | PasswordLengthUnacceptable | 400 |
//! | IdentityAlreadyExists | 409 |
//! | IdentityDoesNotExist | 401 |
//! | TokenIssuanceFailed | 500 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Closed set of identity failures surfaced to callers.
///
/// Infrastructure failures carry no detail. The detail is logged where the
/// failure is observed and then dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("email address is not valid")]
    InvalidEmail,

    #[error("password length is unacceptable")]
    PasswordLengthUnacceptable,

    #[error("identity already exists")]
    IdentityAlreadyExists,

    #[error("identity does not exist")]
    IdentityDoesNotExist,

    #[error("unable to issue token")]
    TokenIssuanceFailed,

    #[error("unable to process request")]
    Infrastructure,
}

impl IdentityError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            IdentityError::InvalidEmail => ErrorCode::InvalidEmail,
            IdentityError::PasswordLengthUnacceptable => ErrorCode::PasswordLengthUnacceptable,
            IdentityError::IdentityAlreadyExists => ErrorCode::IdentityAlreadyExists,
            IdentityError::IdentityDoesNotExist => ErrorCode::IdentityDoesNotExist,
            IdentityError::TokenIssuanceFailed => ErrorCode::TokenIssuanceFailed,
            IdentityError::Infrastructure => ErrorCode::InternalError,
        }
    }
}

impl From<DomainError> for IdentityError {
    /// Keeps the business rejections storage is allowed to report and
    /// collapses everything else.
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::IdentityAlreadyExists => IdentityError::IdentityAlreadyExists,
            ErrorCode::IdentityDoesNotExist => IdentityError::IdentityDoesNotExist,
            ErrorCode::InvalidEmail => IdentityError::InvalidEmail,
            ErrorCode::PasswordLengthUnacceptable => IdentityError::PasswordLengthUnacceptable,
            _ => IdentityError::Infrastructure,
        }
    }
}

impl From<IdentityError> for DomainError {
    fn from(err: IdentityError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
