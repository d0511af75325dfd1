//! Authentication adapters.
//!
//! - `jwt_codec` - HS256 implementation of the `TokenCodec` port
//! - `password_hasher` - Argon2id hashing used by storage adapters

mod jwt_codec;
mod password_hasher;

pub use jwt_codec::JwtTokenCodec;
pub use password_hasher::Argon2PasswordHasher;
