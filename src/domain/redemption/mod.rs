//! Redemption domain module.
//!
//! Advances a coupon from available to redeemed exactly enough times.
//!
//! # Module Structure
//!
//! - `state` - CouponState state machine
//! - `record` - Redemption policy, per-coupon record and eligibility rule
//! - `errors` - RedemptionError

mod errors;
mod record;
mod state;

pub use errors::RedemptionError;
pub use record::{
    CouponRedemption, RedemptionEntry, RedemptionOutcome, RedemptionPolicy, RedemptionRejection,
    MAX_REDEEMED_COUNT,
};
pub use state::CouponState;
