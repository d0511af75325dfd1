//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `IdentityRepository` - Identity persistence with email uniqueness
//! - `CouponRepository` - Coupon state lookup and atomic redemption
//! - `TokenCodec` - Bearer token signing and verification

mod coupon_repository;
mod identity_repository;
mod token_codec;

pub use coupon_repository::CouponRepository;
pub use identity_repository::IdentityRepository;
pub use token_codec::TokenCodec;
