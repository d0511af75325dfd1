//! The identity behind a verified bearer token.
//!
//! HTTP middleware inserts this into request extensions once the token
//! codec has accepted the presented token. Handlers read it back to
//! attribute privileged calls such as coupon redemption.

use crate::domain::foundation::IdentityId;

/// Identity resolved from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub id: IdentityId,
}

impl AuthenticatedIdentity {
    pub fn new(id: IdentityId) -> Self {
        Self { id }
    }
}

impl From<IdentityId> for AuthenticatedIdentity {
    fn from(id: IdentityId) -> Self {
        Self::new(id)
    }
}
