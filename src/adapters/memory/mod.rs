//! In-memory storage adapters.
//!
//! Process-local implementations of the storage ports. They honor the same
//! contracts as the Postgres adapters (email uniqueness at write time,
//! atomic conditional redemption) and back the binary when no database is
//! configured.

mod coupon_store;
mod identity_store;

pub use coupon_store::InMemoryCouponStore;
pub use identity_store::InMemoryIdentityStore;
