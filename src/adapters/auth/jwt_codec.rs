//! HS256 bearer token codec.
//!
//! Tokens are compact JWTs carrying `sub`, `exp` and `iat`. Only HS256 is
//! accepted. A token whose header names any other algorithm is rejected
//! before its signature is looked at, which closes the classic
//! "verify an RS256 token with the HMAC secret" confusion.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::{IdentityId, Timestamp, ValidationError};
use crate::domain::identity::{IssuedToken, TokenClaims, TokenError, MAX_TOKEN_TTL_DAYS};
use crate::ports::TokenCodec;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Signs and verifies HS256 tokens with a process-wide secret.
#[derive(Clone)]
pub struct JwtTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_days: i64,
}

impl JwtTokenCodec {
    /// Builds a codec from the signing secret and token lifetime.
    ///
    /// # Errors
    ///
    /// Fails for an empty secret or a lifetime outside
    /// `1..=MAX_TOKEN_TTL_DAYS`. Callers treat this as fatal startup
    /// misconfiguration.
    pub fn new(secret: &SecretString, ttl_days: i64) -> Result<Self, ValidationError> {
        let secret = secret.expose_secret().as_bytes();
        if secret.is_empty() {
            return Err(ValidationError::empty_field("jwt_secret"));
        }
        if !(1..=MAX_TOKEN_TTL_DAYS).contains(&ttl_days) {
            return Err(ValidationError::out_of_range(
                "token_ttl_days",
                1,
                MAX_TOKEN_TTL_DAYS,
                ttl_days,
            ));
        }

        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked against an explicit clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_days,
        })
    }

    /// Token lifetime in days.
    pub fn ttl_days(&self) -> i64 {
        self.ttl_days
    }

    /// Signs a token for `subject` as if issued at `issued_at`.
    pub fn issue_at(
        &self,
        subject: &IdentityId,
        issued_at: Timestamp,
    ) -> Result<IssuedToken, TokenError> {
        let claims = TokenClaims::new(subject, issued_at, self.ttl_days)?;
        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))?;
        let expires_at = Timestamp::from_unix_secs(claims.exp)
            .ok_or_else(|| TokenError::SigningFailed("expiry out of range".to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verifies `token` as of `now` and returns its subject.
    pub fn verify_at(&self, token: &str, now: Timestamp) -> Result<IdentityId, TokenError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    TokenError::UnexpectedAlgorithm
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            },
        )?;

        if data.claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        IdentityId::new(data.claims.sub).map_err(|_| TokenError::Malformed)
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, subject: &IdentityId) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject, Timestamp::now())
    }

    fn verify(&self, token: &str) -> Result<IdentityId, TokenError> {
        self.verify_at(token, Timestamp::now())
    }
}

impl std::fmt::Debug for JwtTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenCodec")
            .field("algorithm", &ALGORITHM)
            .field("ttl_days", &self.ttl_days)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use proptest::prelude::*;

    const SECRET: &str = "david secret key";

    fn codec() -> JwtTokenCodec {
        JwtTokenCodec::new(&SecretString::new(SECRET.to_string()), 25).unwrap()
    }

    fn subject() -> IdentityId {
        IdentityId::new("12ddf").unwrap()
    }

    fn segments(token: &str) -> Vec<String> {
        token.split('.').map(str::to_string).collect()
    }

    fn claims_segment(now: Timestamp) -> String {
        let claims = TokenClaims::new(&subject(), now, 25).unwrap();
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Construction
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn rejects_empty_secret() {
        let result = JwtTokenCodec::new(&SecretString::new(String::new()), 25);
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn rejects_non_positive_lifetime() {
        let result = JwtTokenCodec::new(&SecretString::new(SECRET.to_string()), 0);
        assert!(matches!(result, Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn rejects_lifetime_beyond_maximum() {
        let secret = SecretString::new(SECRET.to_string());

        for ttl_days in [MAX_TOKEN_TTL_DAYS + 1, 1_000_000_000, i64::MAX] {
            let result = JwtTokenCodec::new(&secret, ttl_days);
            assert_eq!(
                result.err(),
                Some(ValidationError::out_of_range(
                    "token_ttl_days",
                    1,
                    MAX_TOKEN_TTL_DAYS,
                    ttl_days
                ))
            );
        }
    }

    #[test]
    fn longest_allowed_lifetime_issues_verifiable_tokens() {
        let codec = JwtTokenCodec::new(&SecretString::new(SECRET.to_string()), MAX_TOKEN_TTL_DAYS)
            .unwrap();
        let issued = codec.issue(&subject()).unwrap();

        assert_eq!(codec.verify(&issued.token), Ok(subject()));
    }

    #[test]
    fn debug_output_omits_keys() {
        let rendered = format!("{:?}", codec());
        assert!(!rendered.contains(SECRET));
        assert!(rendered.contains("HS256"));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Issue and verify
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn issued_token_verifies_to_its_subject() {
        let codec = codec();
        let issued = codec.issue(&subject()).unwrap();
        assert_eq!(codec.verify(&issued.token), Ok(subject()));
    }

    #[test]
    fn issued_token_expires_after_ttl() {
        let now = Timestamp::from_unix_secs(1_700_000_000).unwrap();
        let issued = codec().issue_at(&subject(), now).unwrap();
        assert_eq!(issued.expires_at, now.add_days(25));
    }

    #[test]
    fn token_is_rejected_once_expired() {
        let codec = codec();
        let now = Timestamp::now();
        let issued = codec.issue_at(&subject(), now.minus_days(26)).unwrap();

        assert_eq!(codec.verify(&issued.token), Err(TokenError::Expired));
    }

    #[test]
    fn token_is_accepted_just_before_expiry() {
        let codec = codec();
        let issued_at = Timestamp::from_unix_secs(1_700_000_000).unwrap();
        let issued = codec.issue_at(&subject(), issued_at).unwrap();

        let last_second = issued_at.add_days(25).plus_secs(-1);
        assert_eq!(codec.verify_at(&issued.token, last_second), Ok(subject()));
        assert_eq!(
            codec.verify_at(&issued.token, issued_at.add_days(25)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other =
            JwtTokenCodec::new(&SecretString::new("another secret key".to_string()), 25).unwrap();
        let issued = other.issue(&subject()).unwrap();

        assert_eq!(codec().verify(&issued.token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(codec().verify("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(codec().verify(""), Err(TokenError::Malformed));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Algorithm confusion
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn hs384_token_with_same_secret_is_rejected() {
        let claims = TokenClaims::new(&subject(), Timestamp::now(), 25).unwrap();
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(codec().verify(&token), Err(TokenError::UnexpectedAlgorithm));
    }

    #[test]
    fn rs256_header_with_valid_hmac_signature_is_rejected() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let message = format!("{}.{}", header, claims_segment(Timestamp::now()));
        let signature = jsonwebtoken::crypto::sign(
            message.as_bytes(),
            &EncodingKey::from_secret(SECRET.as_bytes()),
            Algorithm::HS256,
        )
        .unwrap();
        let token = format!("{}.{}", message, signature);

        assert_eq!(codec().verify(&token), Err(TokenError::UnexpectedAlgorithm));
    }

    #[test]
    fn unsigned_none_token_is_rejected() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let token = format!("{}.{}.", header, claims_segment(Timestamp::now()));

        assert!(codec().verify(&token).is_err());
    }

    #[test]
    fn token_without_subject_is_rejected() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let exp = Timestamp::now().add_days(1).as_unix_secs();
        let claims = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp));
        let message = format!("{}.{}", header, claims);
        let signature = jsonwebtoken::crypto::sign(
            message.as_bytes(),
            &EncodingKey::from_secret(SECRET.as_bytes()),
            Algorithm::HS256,
        )
        .unwrap();

        assert!(codec().verify(&format!("{}.{}", message, signature)).is_err());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Properties
    // ════════════════════════════════════════════════════════════════════════════

    proptest! {
        #[test]
        fn any_subject_round_trips(raw in "[A-Za-z0-9_-]{1,48}", key in "[ -~]{1,64}") {
            let codec = JwtTokenCodec::new(&SecretString::new(key), 25).unwrap();
            let subject = IdentityId::new(raw).unwrap();

            let issued = codec.issue(&subject).unwrap();

            prop_assert_eq!(codec.verify(&issued.token), Ok(subject));
        }

        #[test]
        fn flipping_any_signature_bit_is_rejected(bit in 0usize..256) {
            let codec = codec();
            let issued = codec.issue(&subject()).unwrap();
            let parts = segments(&issued.token);

            let mut signature = URL_SAFE_NO_PAD.decode(&parts[2]).unwrap();
            signature[bit / 8] ^= 1 << (bit % 8);
            let tampered = format!(
                "{}.{}.{}",
                parts[0],
                parts[1],
                URL_SAFE_NO_PAD.encode(&signature)
            );

            prop_assert_eq!(codec.verify(&tampered), Err(TokenError::InvalidSignature));
        }
    }
}
