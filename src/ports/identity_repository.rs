//! Identity storage port.
//!
//! The storage collaborator owns identity records and password hashes.
//! The core hands it shape-checked credentials and receives opaque
//! identity ids back.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, IdentityId};
use crate::domain::identity::{Email, Password};

/// Repository port for identity persistence.
///
/// # Contract
///
/// Implementations must:
/// - Enforce email uniqueness as a hard constraint at write time. A losing
///   concurrent writer fails with `ErrorCode::IdentityAlreadyExists`.
/// - Never store the secret in clear.
/// - Express absence as `Ok(None)`, distinct from failure.
/// - Report infrastructure failures as `DomainError` with an
///   infrastructure `ErrorCode`.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Persists a new identity and returns its id.
    ///
    /// # Errors
    ///
    /// - `IdentityAlreadyExists` if the email is taken
    /// - `DatabaseError` on persistence failure
    async fn create_identity(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<IdentityId, DomainError>;

    /// Finds the identity registered under `email`.
    async fn identity_by_email(&self, email: &Email) -> Result<Option<IdentityId>, DomainError>;

    /// Finds the identity whose email and secret both match.
    ///
    /// Returns `None` for an unknown email and for a wrong secret alike.
    async fn identity_by_credential(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Option<IdentityId>, DomainError>;

    /// Records a password reset request for `email`.
    ///
    /// Succeeds whether or not the email is registered.
    async fn reset_password(&self, email: &Email) -> Result<(), DomainError>;
}
