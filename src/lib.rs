//! Coupon Cutter - identity and coupon redemption backend.
//!
//! Two cooperating services:
//!
//! - `IdentityService` creates accounts, exchanges credentials for signed
//!   bearer tokens and resolves tokens back to identities.
//! - `RedemptionEngine` reports coupon state and redeems coupons
//!   atomically against their usage limits.
//!
//! Storage is pluggable through the ports in [`ports`]: Postgres for
//! deployments, in-memory stores for development and tests.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
