//! Credential value objects.
//!
//! An email/password pair is shape-checked here, before any storage
//! collaborator sees it. Nothing in this module is persisted.

use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use super::IdentityError;

/// Shortest accepted normalized address (`a@b`).
pub const EMAIL_MIN_LEN: usize = 3;
/// Longest accepted normalized address.
pub const EMAIL_MAX_LEN: usize = 254;
/// Shortest accepted secret, in bytes.
pub const PASSWORD_MIN_LEN: usize = 6;
/// Longest accepted secret, in bytes.
pub const PASSWORD_MAX_LEN: usize = 64;

static EMAIL_GRAMMAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email grammar is a valid regex")
});

/// A normalized (trimmed, lower-cased) email address that passed the grammar check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Normalizes and validates a raw address.
    ///
    /// # Errors
    ///
    /// `IdentityError::InvalidEmail` when the normalized value is outside
    /// `EMAIL_MIN_LEN..=EMAIL_MAX_LEN` or does not match the address grammar.
    pub fn parse(raw: &str) -> Result<Self, IdentityError> {
        let normalized = raw.trim().to_lowercase();
        let len = normalized.chars().count();
        if !(EMAIL_MIN_LEN..=EMAIL_MAX_LEN).contains(&len) {
            return Err(IdentityError::InvalidEmail);
        }
        if !EMAIL_GRAMMAR.is_match(&normalized) {
            return Err(IdentityError::InvalidEmail);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A secret whose length is within bounds. Never printed, never logged.
pub struct Password(SecretString);

impl Password {
    /// Wraps a raw secret after checking its byte length.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdentityError> {
        let raw = raw.into();
        if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&raw.len()) {
            return Err(IdentityError::PasswordLengthUnacceptable);
        }
        Ok(Self(SecretString::new(raw)))
    }

    /// Exposes the secret to a hasher. Callers must not log the result.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

/// A shape-checked email and secret pair.
#[derive(Debug)]
pub struct Credential {
    pub email: Email,
    pub password: Password,
}

impl Credential {
    /// Validates the email first, then the secret.
    pub fn parse(email: &str, password: impl Into<String>) -> Result<Self, IdentityError> {
        let email = Email::parse(email)?;
        let password = Password::new(password)?;
        Ok(Self { email, password })
    }
}
