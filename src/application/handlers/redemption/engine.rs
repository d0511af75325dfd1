//! RedemptionEngine - The redemption operations exposed to callers.
//!
//! Independent of the identity service apart from the caller identity it
//! receives. Authorizing that identity is the caller's job.

use std::sync::Arc;

use crate::application::StorageDeadline;
use crate::domain::foundation::{CouponId, IdentityId};
use crate::domain::redemption::{CouponState, RedemptionError};
use crate::ports::CouponRepository;

use super::{
    GetCouponStateHandler, GetCouponStateQuery, VerifyRedemptionCommand, VerifyRedemptionHandler,
    VerifyRedemptionResult,
};

/// Facade over the redemption handlers.
#[derive(Clone)]
pub struct RedemptionEngine {
    repository: Arc<dyn CouponRepository>,
    deadline: StorageDeadline,
}

impl RedemptionEngine {
    pub fn new(repository: Arc<dyn CouponRepository>, deadline: StorageDeadline) -> Self {
        Self {
            repository,
            deadline,
        }
    }

    /// Current state of a coupon. An empty or unknown id is `CouponNotValid`.
    pub async fn coupon_state(&self, coupon_id: &str) -> Result<CouponState, RedemptionError> {
        let coupon_id = parse_coupon_id(coupon_id)?;
        GetCouponStateHandler::new(self.repository.clone(), self.deadline)
            .handle(GetCouponStateQuery { coupon_id })
            .await
    }

    /// Atomically redeems one unit of a coupon's allowance for `acting_identity`.
    pub async fn verify_redemption(
        &self,
        acting_identity: &IdentityId,
        coupon_id: &str,
    ) -> Result<VerifyRedemptionResult, RedemptionError> {
        let coupon_id = parse_coupon_id(coupon_id)?;
        VerifyRedemptionHandler::new(self.repository.clone(), self.deadline)
            .handle(VerifyRedemptionCommand {
                redeemed_by: acting_identity.clone(),
                coupon_id,
            })
            .await
    }
}

fn parse_coupon_id(raw: &str) -> Result<CouponId, RedemptionError> {
    CouponId::new(raw).map_err(|_| RedemptionError::CouponNotValid)
}
