//! Redemption handlers.
//!
//! Business rejections come back from storage as outcomes and map onto the
//! closed `RedemptionError` set. Anything else is logged and collapses to
//! `RedemptionError::Infrastructure`.

mod engine;
mod get_coupon_state;
mod verify_redemption;

pub use engine::RedemptionEngine;
pub use get_coupon_state::{GetCouponStateHandler, GetCouponStateQuery};
pub use verify_redemption::{
    VerifyRedemptionCommand, VerifyRedemptionHandler, VerifyRedemptionResult,
};

use crate::domain::foundation::DomainError;
use crate::domain::redemption::RedemptionError;

fn storage_failure(operation: &'static str, err: DomainError) -> RedemptionError {
    if err.code.is_infrastructure() {
        tracing::error!(
            operation,
            code = %err.code,
            details = ?err.details,
            "coupon storage failed: {}",
            err.message
        );
    }
    RedemptionError::from(err)
}
