//! Per-coupon redemption record and the eligibility rule.
//!
//! The rule here is pure. Storage adapters apply it (or an equivalent
//! conditional write) inside a single atomic unit so that concurrent
//! callers can never both consume the last slot.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CouponId, IdentityId, StateMachine, Timestamp};

use super::CouponState;

/// Highest redemption count any coupon can reach.
///
/// Matches the `INTEGER` counter column so every store runs out at the
/// same point and reports it the same way.
pub const MAX_REDEEMED_COUNT: u32 = i32::MAX as u32;

/// How many times a coupon may be redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RedemptionPolicy {
    /// Consumed by the first redemption regardless of `max_redemption`.
    pub single_use: bool,
    /// Finite allowance. `None` means unlimited.
    pub max_redemption: Option<u32>,
}

impl RedemptionPolicy {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn single_use() -> Self {
        Self {
            single_use: true,
            max_redemption: None,
        }
    }

    pub fn limited(max_redemption: u32) -> Self {
        Self {
            single_use: false,
            max_redemption: Some(max_redemption),
        }
    }

    /// True when a redemption bringing the count to `count` exhausts the coupon.
    pub fn is_exhausted_at(&self, count: u32) -> bool {
        self.single_use || self.max_redemption.is_some_and(|max| count >= max)
    }
}

/// Why a coupon cannot be redeemed right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedemptionRejection {
    NotFound,
    Inactive,
    Expired,
    LimitExceeded,
    AlreadyUsed,
}

/// Mutable redemption state of one coupon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponRedemption {
    pub coupon_id: CouponId,
    pub state: CouponState,
    pub redeemed_count: u32,
    pub policy: RedemptionPolicy,
    pub expires_at: Option<Timestamp>,
}

impl CouponRedemption {
    /// A fresh, never-redeemed active coupon.
    pub fn new(coupon_id: CouponId, policy: RedemptionPolicy) -> Self {
        Self {
            coupon_id,
            state: CouponState::Active,
            redeemed_count: 0,
            policy,
            expires_at: None,
        }
    }

    pub fn with_expiry(mut self, expires_at: Timestamp) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn with_state(mut self, state: CouponState) -> Self {
        self.state = state;
        self
    }

    pub fn with_redeemed_count(mut self, redeemed_count: u32) -> Self {
        self.redeemed_count = redeemed_count;
        self
    }

    /// Checks eligibility without changing anything.
    ///
    /// Order: inactive, expired, limit reached, already used. The limit is
    /// the explicit `max_redemption` or `MAX_REDEEMED_COUNT`, whichever
    /// comes first.
    pub fn check(&self, now: Timestamp) -> Result<(), RedemptionRejection> {
        if self.state == CouponState::Inactive {
            return Err(RedemptionRejection::Inactive);
        }
        if self.expires_at.is_some_and(|expires_at| !now.is_before(&expires_at)) {
            return Err(RedemptionRejection::Expired);
        }
        let limit = self
            .policy
            .max_redemption
            .map_or(MAX_REDEEMED_COUNT, |max| max.min(MAX_REDEEMED_COUNT));
        if self.redeemed_count >= limit {
            return Err(RedemptionRejection::LimitExceeded);
        }
        if self.state == CouponState::Used {
            return Err(RedemptionRejection::AlreadyUsed);
        }
        Ok(())
    }

    /// Returns the record after one more redemption, or why there is none.
    pub fn redeem(&self, now: Timestamp) -> Result<CouponRedemption, RedemptionRejection> {
        self.check(now)?;

        let redeemed_count = self
            .redeemed_count
            .checked_add(1)
            .ok_or(RedemptionRejection::LimitExceeded)?;
        let state = if self.policy.is_exhausted_at(redeemed_count) {
            CouponState::Used
        } else {
            CouponState::Active
        };
        debug_assert!(self.state.can_transition_to(&state));

        Ok(CouponRedemption {
            redeemed_count,
            state,
            ..self.clone()
        })
    }
}

/// Result of one atomic redemption attempt at the storage boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedemptionOutcome {
    /// The record as written by the successful redemption.
    Redeemed(CouponRedemption),
    Rejected(RedemptionRejection),
}

/// Ledger line for one successful redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionEntry {
    pub coupon_id: CouponId,
    pub redeemed_by: IdentityId,
    pub redeemed_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coupon(policy: RedemptionPolicy) -> CouponRedemption {
        CouponRedemption::new(CouponId::new("SPRING-10").unwrap(), policy)
    }

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000).unwrap()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Eligibility
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn inactive_coupon_is_rejected_first() {
        let record = coupon(RedemptionPolicy::limited(1))
            .with_state(CouponState::Inactive)
            .with_redeemed_count(1)
            .with_expiry(now().minus_days(1));

        assert_eq!(record.check(now()), Err(RedemptionRejection::Inactive));
    }

    #[test]
    fn coupon_is_expired_at_its_expiry_instant() {
        let record = coupon(RedemptionPolicy::unlimited()).with_expiry(now());
        assert_eq!(record.check(now()), Err(RedemptionRejection::Expired));

        let later = coupon(RedemptionPolicy::unlimited()).with_expiry(now().plus_secs(1));
        assert_eq!(later.check(now()), Ok(()));
    }

    #[test]
    fn reached_limit_wins_over_used_state() {
        let record = coupon(RedemptionPolicy::limited(2))
            .with_state(CouponState::Used)
            .with_redeemed_count(2);

        assert_eq!(record.check(now()), Err(RedemptionRejection::LimitExceeded));
    }

    #[test]
    fn used_single_use_coupon_reports_already_used() {
        let record = coupon(RedemptionPolicy::single_use())
            .with_state(CouponState::Used)
            .with_redeemed_count(1);

        assert_eq!(record.check(now()), Err(RedemptionRejection::AlreadyUsed));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Transitions
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn partial_redemption_stays_active() {
        let next = coupon(RedemptionPolicy::limited(3)).redeem(now()).unwrap();
        assert_eq!(next.redeemed_count, 1);
        assert_eq!(next.state, CouponState::Active);
    }

    #[test]
    fn reaching_the_limit_transitions_to_used() {
        let next = coupon(RedemptionPolicy::limited(2))
            .with_redeemed_count(1)
            .redeem(now())
            .unwrap();
        assert_eq!(next.redeemed_count, 2);
        assert_eq!(next.state, CouponState::Used);
    }

    #[test]
    fn single_use_transitions_to_used_immediately() {
        let next = coupon(RedemptionPolicy::single_use()).redeem(now()).unwrap();
        assert_eq!(next.state, CouponState::Used);
        assert_eq!(
            next.redeem(now()),
            Err(RedemptionRejection::AlreadyUsed)
        );
    }

    #[test]
    fn unlimited_coupon_never_exhausts() {
        let mut record = coupon(RedemptionPolicy::unlimited());
        for _ in 0..100 {
            record = record.redeem(now()).unwrap();
        }
        assert_eq!(record.redeemed_count, 100);
        assert_eq!(record.state, CouponState::Active);
    }

    #[test]
    fn limit_of_n_allows_exactly_n_redemptions() {
        let mut record = coupon(RedemptionPolicy::limited(4));
        for _ in 0..4 {
            record = record.redeem(now()).unwrap();
        }
        assert_eq!(record.state, CouponState::Used);
        assert_eq!(record.redeem(now()), Err(RedemptionRejection::LimitExceeded));
    }

    #[test]
    fn zero_limit_is_never_redeemable() {
        let record = coupon(RedemptionPolicy::limited(0));
        assert_eq!(record.redeem(now()), Err(RedemptionRejection::LimitExceeded));
    }

    #[test]
    fn count_overflow_is_rejected() {
        let record = coupon(RedemptionPolicy::unlimited()).with_redeemed_count(u32::MAX);
        assert_eq!(record.redeem(now()), Err(RedemptionRejection::LimitExceeded));
    }

    #[test]
    fn counter_ceiling_is_a_limit_for_every_policy() {
        let unlimited = coupon(RedemptionPolicy::unlimited())
            .with_redeemed_count(MAX_REDEEMED_COUNT - 1)
            .redeem(now())
            .unwrap();
        assert_eq!(unlimited.redeemed_count, MAX_REDEEMED_COUNT);
        assert_eq!(unlimited.redeem(now()), Err(RedemptionRejection::LimitExceeded));

        let huge_limit =
            coupon(RedemptionPolicy::limited(u32::MAX)).with_redeemed_count(MAX_REDEEMED_COUNT);
        assert_eq!(huge_limit.check(now()), Err(RedemptionRejection::LimitExceeded));
    }
}
