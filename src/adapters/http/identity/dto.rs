//! Request and response bodies for identity endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::identity::CreateAccountResult;
use crate::domain::foundation::Timestamp;
use crate::domain::identity::IssuedToken;

/// Body for signup and login.
///
/// `Debug` is hand-written so the password never reaches a log line.
#[derive(Clone, Deserialize)]
pub struct CredentialRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for CredentialRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub identity_id: String,
}

impl From<CreateAccountResult> for SignupResponse {
    fn from(result: CreateAccountResult) -> Self {
        Self {
            identity_id: result.identity_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_at: Timestamp,
}

impl From<IssuedToken> for LoginResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            token_type: "Bearer".to_string(),
            expires_at: issued.expires_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}
