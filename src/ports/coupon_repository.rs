//! Coupon redemption storage port.

use async_trait::async_trait;

use crate::domain::foundation::{CouponId, DomainError, IdentityId};
use crate::domain::redemption::{CouponState, RedemptionOutcome};

/// Repository port for coupon redemption state.
///
/// # Contract
///
/// `atomic_redeem` is one indivisible read-modify-write from the point of
/// view of concurrent callers. It reads the current state and count,
/// applies the eligibility rule, and if eligible writes the incremented
/// count, the possibly-changed state and a ledger line attributing the
/// redemption to `redeemed_by`. For a coupon with N remaining slots, at
/// most N concurrent calls may return `Redeemed`.
///
/// Business rejections are `Ok(RedemptionOutcome::Rejected(..))`, not
/// errors. `Err` is reserved for infrastructure failures.
#[async_trait]
pub trait CouponRepository: Send + Sync {
    /// Current redemption state, or `None` if the id does not resolve.
    async fn coupon_state(&self, coupon_id: &CouponId) -> Result<Option<CouponState>, DomainError>;

    /// Conditionally redeems one unit of the coupon's allowance.
    async fn atomic_redeem(
        &self,
        coupon_id: &CouponId,
        redeemed_by: &IdentityId,
    ) -> Result<RedemptionOutcome, DomainError>;
}
