//! GetCouponStateHandler - Read-only coupon state lookup.

use std::sync::Arc;

use crate::application::StorageDeadline;
use crate::domain::foundation::CouponId;
use crate::domain::redemption::{CouponState, RedemptionError};
use crate::ports::CouponRepository;

use super::storage_failure;

/// Query for a coupon's current redemption state.
#[derive(Debug, Clone)]
pub struct GetCouponStateQuery {
    pub coupon_id: CouponId,
}

/// Handler for coupon state lookups.
pub struct GetCouponStateHandler {
    repository: Arc<dyn CouponRepository>,
    deadline: StorageDeadline,
}

impl GetCouponStateHandler {
    pub fn new(repository: Arc<dyn CouponRepository>, deadline: StorageDeadline) -> Self {
        Self {
            repository,
            deadline,
        }
    }

    pub async fn handle(&self, query: GetCouponStateQuery) -> Result<CouponState, RedemptionError> {
        self.deadline
            .run("coupon_state", self.repository.coupon_state(&query.coupon_id))
            .await
            .map_err(|e| storage_failure("coupon_state", e))?
            .ok_or(RedemptionError::CouponNotValid)
    }
}
