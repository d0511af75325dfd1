//! Bearer token types.
//!
//! A token is a signed, self-contained `{subject, expiry}` assertion. It is
//! never stored server-side and stays valid until its expiry elapses or the
//! signing secret changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{IdentityId, Timestamp};

/// Default lifetime of an issued token.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 25;

/// Longest token lifetime a codec accepts.
pub const MAX_TOKEN_TTL_DAYS: i64 = 365;

/// Claims carried inside a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the identity the token was issued for.
    pub sub: String,
    /// Expiry as Unix seconds.
    pub exp: i64,
    /// Issue time as Unix seconds.
    pub iat: i64,
}

impl TokenClaims {
    /// Builds claims for `subject`, issued at `issued_at`, living `ttl_days`.
    ///
    /// Fails with `SigningFailed` when the expiry is not representable.
    pub fn new(
        subject: &IdentityId,
        issued_at: Timestamp,
        ttl_days: i64,
    ) -> Result<Self, TokenError> {
        let expires_at = issued_at
            .checked_add_days(ttl_days)
            .ok_or_else(|| TokenError::SigningFailed("expiry out of range".to_string()))?;

        Ok(Self {
            sub: subject.as_str().to_string(),
            exp: expires_at.as_unix_secs(),
            iat: issued_at.as_unix_secs(),
        })
    }

    /// True when `now` is at or past the embedded expiry.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now.as_unix_secs() >= self.exp
    }
}

/// A freshly signed token and the moment it stops being accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Reasons a token codec can fail.
///
/// Only ever logged. Callers of token verification see a single
/// "not valid" outcome regardless of which check failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature does not verify")]
    InvalidSignature,

    #[error("token uses an unexpected signing algorithm")]
    UnexpectedAlgorithm,

    #[error("token has expired")]
    Expired,

    #[error("token signing failed: {0}")]
    SigningFailed(String),
}
