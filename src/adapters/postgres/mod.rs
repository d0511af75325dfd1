//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresIdentityRepository` - Identities with a unique email constraint
//! - `PostgresCouponRepository` - Conditional-update redemption plus ledger
//!
//! Schema lives in `migrations/` and is applied with `run_migrations`.

mod coupon_repository;
mod identity_repository;

pub use coupon_repository::PostgresCouponRepository;
pub use identity_repository::PostgresIdentityRepository;

use sqlx::PgPool;

use crate::domain::foundation::DomainError;

/// Applies pending schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))
}
