//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::DEFAULT_STORAGE_TIMEOUT_MS;
use crate::domain::identity::{DEFAULT_TOKEN_TTL_DAYS, MAX_TOKEN_TTL_DAYS};

/// Shortest HS256 signing secret accepted at startup.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

/// Authentication and storage-deadline configuration
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret for bearer tokens
    pub jwt_secret: SecretString,

    /// Token lifetime in days
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,

    /// Deadline applied to every storage call, in milliseconds
    #[serde(default = "default_storage_timeout_ms")]
    pub storage_timeout_ms: u64,

    /// Argon2id memory cost in KiB
    #[serde(default = "default_password_hash_memory_kib")]
    pub password_hash_memory_kib: u32,

    /// Argon2id iteration count
    #[serde(default = "default_password_hash_iterations")]
    pub password_hash_iterations: u32,
}

impl AuthConfig {
    /// Get storage timeout as Duration
    pub fn storage_timeout(&self) -> Duration {
        Duration::from_millis(self.storage_timeout_ms)
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(ValidationError::JwtSecretTooShort(MIN_JWT_SECRET_BYTES));
        }
        if !(1..=MAX_TOKEN_TTL_DAYS).contains(&self.token_ttl_days) {
            return Err(ValidationError::InvalidTokenTtl);
        }
        if self.storage_timeout_ms == 0 || self.storage_timeout_ms > 60_000 {
            return Err(ValidationError::InvalidStorageTimeout);
        }
        // argon2 needs at least 8 KiB per lane and one pass.
        if self.password_hash_memory_kib < 8 || self.password_hash_iterations == 0 {
            return Err(ValidationError::InvalidPasswordHashParams);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: SecretString::new(String::new()),
            token_ttl_days: default_token_ttl_days(),
            storage_timeout_ms: default_storage_timeout_ms(),
            password_hash_memory_kib: default_password_hash_memory_kib(),
            password_hash_iterations: default_password_hash_iterations(),
        }
    }
}

fn default_token_ttl_days() -> i64 {
    DEFAULT_TOKEN_TTL_DAYS
}

fn default_storage_timeout_ms() -> u64 {
    DEFAULT_STORAGE_TIMEOUT_MS
}

fn default_password_hash_memory_kib() -> u32 {
    19_456
}

fn default_password_hash_iterations() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_secret(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: SecretString::new(secret.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.token_ttl_days, 25);
        assert_eq!(config.storage_timeout(), Duration::from_millis(5000));
        assert_eq!(config.password_hash_memory_kib, 19_456);
        assert_eq!(config.password_hash_iterations, 2);
    }

    #[test]
    fn test_validation_missing_secret() {
        let config = AuthConfig::default();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn test_validation_short_secret() {
        let config = with_secret("too-short");
        assert_eq!(
            config.validate(),
            Err(ValidationError::JwtSecretTooShort(MIN_JWT_SECRET_BYTES))
        );
    }

    #[test]
    fn test_validation_token_ttl_range() {
        let mut config = with_secret(&"k".repeat(32));
        config.token_ttl_days = 0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidTokenTtl));

        config.token_ttl_days = 366;
        assert_eq!(config.validate(), Err(ValidationError::InvalidTokenTtl));

        config.token_ttl_days = 365;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_storage_timeout() {
        let mut config = with_secret(&"k".repeat(32));
        config.storage_timeout_ms = 0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidStorageTimeout));
    }

    #[test]
    fn test_validation_hash_params() {
        let mut config = with_secret(&"k".repeat(32));
        config.password_hash_memory_kib = 4;
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidPasswordHashParams)
        );
    }

    #[test]
    fn test_validation_valid_config() {
        let config = with_secret("a-signing-secret-of-at-least-32-bytes");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = with_secret("a-signing-secret-of-at-least-32-bytes");
        assert!(!format!("{config:?}").contains("a-signing-secret"));
    }
}
