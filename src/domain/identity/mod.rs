//! Identity domain module.
//!
//! Credential shape rules, token claims and the identity error taxonomy.
//!
//! # Module Structure
//!
//! - `credential` - Email, Password and Credential value objects
//! - `token` - Token claims, issued token, codec errors
//! - `authenticated` - Identity resolved from a verified token
//! - `errors` - IdentityError

mod authenticated;
mod credential;
mod errors;
mod token;

pub use authenticated::AuthenticatedIdentity;
pub use credential::{
    Credential, Email, Password, EMAIL_MAX_LEN, EMAIL_MIN_LEN, PASSWORD_MAX_LEN,
    PASSWORD_MIN_LEN,
};
pub use errors::IdentityError;
pub use token::{
    IssuedToken, TokenClaims, TokenError, DEFAULT_TOKEN_TTL_DAYS, MAX_TOKEN_TTL_DAYS,
};
