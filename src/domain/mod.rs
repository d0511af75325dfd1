//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `identity` - Credential rules, token claims, identity errors
//! - `redemption` - Coupon redemption state machine and eligibility rule

pub mod foundation;
pub mod identity;
pub mod redemption;
