//! VerifyTokenHandler - Resolves a presented bearer token to its subject.
//!
//! Pure and synchronous: no storage access, no I/O, no cancellation point.

use std::sync::Arc;

use crate::domain::foundation::IdentityId;
use crate::ports::TokenCodec;

/// Handler for bearer token verification.
///
/// Every failure (bad signature, wrong algorithm, expiry, garbage) becomes
/// `None`. The specific reason is logged at debug level and never returned.
pub struct VerifyTokenHandler {
    codec: Arc<dyn TokenCodec>,
}

impl VerifyTokenHandler {
    pub fn new(codec: Arc<dyn TokenCodec>) -> Self {
        Self { codec }
    }

    pub fn handle(&self, token: &str) -> Option<IdentityId> {
        match self.codec.verify(token) {
            Ok(subject) => Some(subject),
            Err(reason) => {
                tracing::debug!(reason = %reason, "bearer token rejected");
                None
            }
        }
    }
}
