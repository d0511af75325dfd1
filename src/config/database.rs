//! PostgreSQL connection settings.
//!
//! The whole section is optional. Without it the binary runs on in-memory
//! storage.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Largest pool the service will open.
const MAX_POOL_SIZE: u32 = 100;

/// Database configuration. Only `url` lacks a usable default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Apply `migrations/` at startup.
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE__URL"));
        }
        if !["postgres://", "postgresql://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
        {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > MAX_POOL_SIZE {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            min_connections: 2,
            max_connections: 20,
            acquire_timeout_secs: 5,
            run_migrations: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn both_postgres_schemes_are_accepted() {
        assert!(with_url("postgres://localhost/coupons").validate().is_ok());
        assert!(with_url("postgresql://user:pass@db:5432/coupons")
            .validate()
            .is_ok());
    }

    #[test]
    fn url_is_required() {
        assert_eq!(
            DatabaseConfig::default().validate(),
            Err(ValidationError::MissingRequired("DATABASE__URL"))
        );
    }

    #[test]
    fn other_schemes_are_rejected() {
        assert_eq!(
            with_url("mysql://localhost/coupons").validate(),
            Err(ValidationError::InvalidDatabaseUrl)
        );
    }

    #[test]
    fn pool_bounds_are_checked() {
        let inverted = DatabaseConfig {
            min_connections: 10,
            max_connections: 5,
            ..with_url("postgres://localhost/coupons")
        };
        assert_eq!(inverted.validate(), Err(ValidationError::InvalidPoolSize));

        let oversized = DatabaseConfig {
            max_connections: MAX_POOL_SIZE + 1,
            ..with_url("postgres://localhost/coupons")
        };
        assert_eq!(oversized.validate(), Err(ValidationError::PoolSizeTooLarge));
    }

    #[test]
    fn acquire_timeout_is_short_by_default() {
        assert_eq!(
            DatabaseConfig::default().acquire_timeout(),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn partial_section_fills_defaults() {
        let config: DatabaseConfig =
            serde_json::from_str(r#"{"url":"postgres://localhost/coupons"}"#).unwrap();
        assert_eq!(config.max_connections, 20);
        assert!(!config.run_migrations);
    }
}
