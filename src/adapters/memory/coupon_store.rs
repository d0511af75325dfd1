//! In-memory coupon store with an attributed redemption ledger.
//!
//! The coupon table and the ledger share one mutex. A redemption reads,
//! evaluates, writes the record and appends the ledger line while holding
//! it, so concurrent attempts are serialized per store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::{CouponId, DomainError, IdentityId, StateMachine, Timestamp};
use crate::domain::redemption::{
    CouponRedemption, CouponState, RedemptionEntry, RedemptionOutcome, RedemptionRejection,
};
use crate::ports::CouponRepository;

#[derive(Debug, Default)]
struct CouponTable {
    coupons: HashMap<CouponId, CouponRedemption>,
    ledger: Vec<RedemptionEntry>,
}

/// Coupon redemption store backed by a process-local map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCouponStore {
    table: Arc<Mutex<CouponTable>>,
}

impl InMemoryCouponStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a coupon record.
    pub async fn insert_coupon(&self, record: CouponRedemption) {
        self.table
            .lock()
            .await
            .coupons
            .insert(record.coupon_id.clone(), record);
    }

    /// Withdraws a coupon. Returns false if it is unknown or already terminal.
    pub async fn deactivate(&self, coupon_id: &CouponId) -> bool {
        let mut table = self.table.lock().await;
        match table.coupons.get_mut(coupon_id) {
            Some(record) => match record.state.transition_to(CouponState::Inactive) {
                Ok(state) => {
                    record.state = state;
                    true
                }
                Err(_) => false,
            },
            None => false,
        }
    }

    /// Full record for a coupon, if known.
    pub async fn coupon(&self, coupon_id: &CouponId) -> Option<CouponRedemption> {
        self.table.lock().await.coupons.get(coupon_id).cloned()
    }

    /// Ledger lines for a coupon, oldest first.
    pub async fn redemptions_for(&self, coupon_id: &CouponId) -> Vec<RedemptionEntry> {
        self.table
            .lock()
            .await
            .ledger
            .iter()
            .filter(|entry| &entry.coupon_id == coupon_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CouponRepository for InMemoryCouponStore {
    async fn coupon_state(&self, coupon_id: &CouponId) -> Result<Option<CouponState>, DomainError> {
        Ok(self
            .table
            .lock()
            .await
            .coupons
            .get(coupon_id)
            .map(|record| record.state))
    }

    async fn atomic_redeem(
        &self,
        coupon_id: &CouponId,
        redeemed_by: &IdentityId,
    ) -> Result<RedemptionOutcome, DomainError> {
        let now = Timestamp::now();
        let mut table = self.table.lock().await;

        let Some(record) = table.coupons.get_mut(coupon_id) else {
            return Ok(RedemptionOutcome::Rejected(RedemptionRejection::NotFound));
        };

        match record.redeem(now) {
            Ok(next) => {
                *record = next.clone();
                table.ledger.push(RedemptionEntry {
                    coupon_id: coupon_id.clone(),
                    redeemed_by: redeemed_by.clone(),
                    redeemed_at: now,
                });
                Ok(RedemptionOutcome::Redeemed(next))
            }
            Err(rejection) => Ok(RedemptionOutcome::Rejected(rejection)),
        }
    }
}
