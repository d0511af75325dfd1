//! Argon2id password hashing for storage adapters.
//!
//! Hashes are PHC strings (`$argon2id$v=19$...`) with a random salt.
//! Hashing and verification run on the blocking pool so request workers
//! are not stalled by the memory-hard work.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::identity::Password;

/// Argon2id hasher with configurable cost.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Builds a hasher with `memory_kib` of memory and `iterations` passes.
    pub fn new(memory_kib: u32, iterations: u32) -> Result<Self, ValidationError> {
        let params = Params::new(memory_kib, iterations, 1, None).map_err(|e| {
            ValidationError::invalid_format("password_hash_params", e.to_string())
        })?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hashes `password` into a PHC string.
    pub async fn hash(&self, password: &Password) -> Result<String, DomainError> {
        let argon2 = self.argon2.clone();
        let secret = SecretString::new(password.expose().to_string());

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(secret.expose_secret().as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("hashing failed: {}", e)))
        })
        .await
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("hashing task failed: {}", e)))?
    }

    /// Checks `password` against a stored PHC string.
    ///
    /// A mismatch is `Ok(false)`. A stored hash that does not parse is an error.
    pub async fn verify(&self, password: &Password, stored: &str) -> Result<bool, DomainError> {
        let argon2 = self.argon2.clone();
        let secret = SecretString::new(password.expose().to_string());
        let stored = stored.to_string();

        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&stored).map_err(|e| {
                DomainError::new(ErrorCode::InternalError, format!("stored hash is invalid: {}", e))
            })?;
            Ok(argon2
                .verify_password(secret.expose_secret().as_bytes(), &parsed)
                .is_ok())
        })
        .await
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("verify task failed: {}", e)))?
    }
}

impl Default for Argon2PasswordHasher {
    /// OWASP-recommended Argon2id cost: 19 MiB, 2 iterations, 1 lane.
    fn default() -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default()),
        }
    }
}

impl std::fmt::Debug for Argon2PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2PasswordHasher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::new(1024, 1).unwrap()
    }

    #[tokio::test]
    async fn hash_is_phc_argon2id() {
        let hash = hasher().hash(&Password::new("password").unwrap()).await.unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("password"));
    }

    #[tokio::test]
    async fn correct_password_verifies() {
        let hasher = hasher();
        let password = Password::new("mySecurePassword123").unwrap();
        let hash = hasher.hash(&password).await.unwrap();

        assert!(hasher.verify(&password, &hash).await.unwrap());
    }

    #[tokio::test]
    async fn wrong_password_does_not_verify() {
        let hasher = hasher();
        let hash = hasher.hash(&Password::new("password").unwrap()).await.unwrap();

        let verified = hasher
            .verify(&Password::new("passw0rd").unwrap(), &hash)
            .await
            .unwrap();
        assert!(!verified);
    }

    #[tokio::test]
    async fn same_password_hashes_differently() {
        let hasher = hasher();
        let password = Password::new("password").unwrap();

        let first = hasher.hash(&password).await.unwrap();
        let second = hasher.hash(&password).await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn unparseable_stored_hash_is_an_error() {
        let result = hasher()
            .verify(&Password::new("password").unwrap(), "plaintext")
            .await;
        assert!(matches!(result, Err(e) if e.code == ErrorCode::InternalError));
    }

    #[test]
    fn rejects_memory_below_argon2_minimum() {
        assert!(Argon2PasswordHasher::new(1, 1).is_err());
    }
}
