//! VerifyRedemptionHandler - Redeems one unit of a coupon's allowance.
//!
//! The check-and-update is a single `atomic_redeem` call. This handler
//! never reads state first and writes later, so it adds no race of its own.

use std::sync::Arc;

use crate::application::StorageDeadline;
use crate::domain::foundation::{CouponId, IdentityId};
use crate::domain::redemption::{CouponState, RedemptionError, RedemptionOutcome};
use crate::ports::CouponRepository;

use super::storage_failure;

/// Command to redeem a coupon on behalf of an already-authorized identity.
#[derive(Debug, Clone)]
pub struct VerifyRedemptionCommand {
    pub redeemed_by: IdentityId,
    pub coupon_id: CouponId,
}

/// State of the coupon right after a successful redemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyRedemptionResult {
    pub state: CouponState,
    pub redeemed_count: u32,
}

/// Handler for coupon redemption.
///
/// The acting identity is attributed in logs and the ledger. It does not
/// gate eligibility.
pub struct VerifyRedemptionHandler {
    repository: Arc<dyn CouponRepository>,
    deadline: StorageDeadline,
}

impl VerifyRedemptionHandler {
    pub fn new(repository: Arc<dyn CouponRepository>, deadline: StorageDeadline) -> Self {
        Self {
            repository,
            deadline,
        }
    }

    pub async fn handle(
        &self,
        cmd: VerifyRedemptionCommand,
    ) -> Result<VerifyRedemptionResult, RedemptionError> {
        let outcome = self
            .deadline
            .run(
                "atomic_redeem",
                self.repository.atomic_redeem(&cmd.coupon_id, &cmd.redeemed_by),
            )
            .await
            .map_err(|e| storage_failure("atomic_redeem", e))?;

        match outcome {
            RedemptionOutcome::Redeemed(record) => {
                tracing::info!(
                    coupon_id = %cmd.coupon_id,
                    redeemed_by = %cmd.redeemed_by,
                    redeemed_count = record.redeemed_count,
                    state = %record.state,
                    "coupon redeemed"
                );
                Ok(VerifyRedemptionResult {
                    state: record.state,
                    redeemed_count: record.redeemed_count,
                })
            }
            RedemptionOutcome::Rejected(rejection) => {
                let err = RedemptionError::from(rejection);
                tracing::info!(
                    coupon_id = %cmd.coupon_id,
                    redeemed_by = %cmd.redeemed_by,
                    outcome = ?rejection,
                    "coupon redemption rejected"
                );
                Err(err)
            }
        }
    }
}
