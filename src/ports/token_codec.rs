//! Token codec port.
//!
//! Signs and verifies bearer tokens. Implementations are stateless and
//! perform no I/O, so verification needs no synchronization and has no
//! cancellation point.

use crate::domain::foundation::IdentityId;
use crate::domain::identity::{IssuedToken, TokenError};

/// Issues and verifies signed `{subject, expiry}` tokens.
///
/// # Contract
///
/// Implementations must:
/// - Accept only the single expected signing algorithm. A token signed any
///   other way is rejected even if its signature is otherwise valid.
/// - Reject tokens whose expiry has passed.
/// - Treat the token string as opaque to every other component.
pub trait TokenCodec: Send + Sync {
    /// Signs a token for `subject` expiring after the configured lifetime.
    fn issue(&self, subject: &IdentityId) -> Result<IssuedToken, TokenError>;

    /// Verifies `token` and returns its subject.
    fn verify(&self, token: &str) -> Result<IdentityId, TokenError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    struct ReversingCodec;

    impl TokenCodec for ReversingCodec {
        fn issue(&self, subject: &IdentityId) -> Result<IssuedToken, TokenError> {
            Ok(IssuedToken {
                token: subject.as_str().chars().rev().collect(),
                expires_at: Timestamp::now().add_days(1),
            })
        }

        fn verify(&self, token: &str) -> Result<IdentityId, TokenError> {
            IdentityId::new(token.chars().rev().collect::<String>())
                .map_err(|_| TokenError::Malformed)
        }
    }

    #[test]
    fn codec_round_trips_through_trait_object() {
        let codec: Box<dyn TokenCodec> = Box::new(ReversingCodec);
        let subject = IdentityId::new("12ddf").unwrap();

        let issued = codec.issue(&subject).unwrap();

        assert_eq!(codec.verify(&issued.token), Ok(subject));
        assert_eq!(codec.verify(""), Err(TokenError::Malformed));
    }
}
