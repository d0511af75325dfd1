//! PostgreSQL implementation of CouponRepository.
//!
//! Redemption is a single conditional `UPDATE ... RETURNING`. Row-level
//! locking makes a concurrent updater wait and then re-check the `WHERE`
//! clause against the committed row, so the last slot is handed out once.
//! The ledger insert shares the transaction. The ledger is write-only
//! from here.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{CouponId, DomainError, ErrorCode, IdentityId, Timestamp};
use crate::domain::redemption::{
    CouponRedemption, CouponState, RedemptionOutcome, RedemptionPolicy, RedemptionRejection,
};
use crate::ports::CouponRepository;

/// `MAX_REDEEMED_COUNT` as the `INTEGER` column stores it.
const COUNTER_CEILING: i32 = i32::MAX;

/// PostgreSQL implementation of the CouponRepository port.
pub struct PostgresCouponRepository {
    pool: PgPool,
}

impl PostgresCouponRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a coupon's redemption state.
#[derive(Debug, sqlx::FromRow)]
struct CouponRow {
    coupon_id: String,
    coupon_state: String,
    redeemed_count: i32,
    single_use: bool,
    max_redemption: Option<i32>,
    expires_at: Option<DateTime<Utc>>,
}

impl TryFrom<CouponRow> for CouponRedemption {
    type Error = DomainError;

    fn try_from(row: CouponRow) -> Result<Self, Self::Error> {
        let max_redemption = row.max_redemption.map(to_count).transpose()?;
        Ok(CouponRedemption {
            coupon_id: CouponId::new(row.coupon_id).map_err(corrupt)?,
            state: row.coupon_state.parse::<CouponState>().map_err(corrupt)?,
            redeemed_count: to_count(row.redeemed_count)?,
            policy: RedemptionPolicy {
                single_use: row.single_use,
                max_redemption,
            },
            expires_at: row.expires_at.map(Timestamp::from_datetime),
        })
    }
}

fn to_count(value: i32) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(corrupt)
}

fn corrupt(e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Corrupt coupon row: {}", e))
}

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::database(format!("{}: {}", context, e))
}

#[async_trait]
impl CouponRepository for PostgresCouponRepository {
    async fn coupon_state(&self, coupon_id: &CouponId) -> Result<Option<CouponState>, DomainError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT coupon_state FROM coupons WHERE coupon_id = $1")
                .bind(coupon_id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("Failed to read coupon state"))?;

        row.map(|(state,)| state.parse::<CouponState>().map_err(corrupt))
            .transpose()
    }

    async fn atomic_redeem(
        &self,
        coupon_id: &CouponId,
        redeemed_by: &IdentityId,
    ) -> Result<RedemptionOutcome, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin redemption"))?;

        let redeemed: Option<CouponRow> = sqlx::query_as(
            r#"
            UPDATE coupons SET
                redeemed_count = redeemed_count + 1,
                coupon_state = CASE
                    WHEN single_use
                        OR (max_redemption IS NOT NULL AND redeemed_count + 1 >= max_redemption)
                    THEN 'used'
                    ELSE 'active'
                END
            WHERE coupon_id = $1
              AND coupon_state = 'active'
              AND (expires_at IS NULL OR expires_at > now())
              AND (max_redemption IS NULL OR redeemed_count < max_redemption)
              AND redeemed_count < $2
            RETURNING coupon_id, coupon_state, redeemed_count, single_use, max_redemption, expires_at
            "#,
        )
        .bind(coupon_id.as_str())
        .bind(COUNTER_CEILING)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to redeem coupon"))?;

        if let Some(row) = redeemed {
            sqlx::query("INSERT INTO redemptions (coupon_id, redeemed_by) VALUES ($1, $2)")
                .bind(coupon_id.as_str())
                .bind(redeemed_by.as_str())
                .execute(&mut *tx)
                .await
                .map_err(db_error("Failed to record redemption"))?;

            tx.commit()
                .await
                .map_err(db_error("Failed to commit redemption"))?;

            return Ok(RedemptionOutcome::Redeemed(CouponRedemption::try_from(row)?));
        }

        // Nothing was updated: read the row to say why.
        let current: Option<CouponRow> = sqlx::query_as(
            r#"
            SELECT coupon_id, coupon_state, redeemed_count, single_use, max_redemption, expires_at
            FROM coupons
            WHERE coupon_id = $1
            "#,
        )
        .bind(coupon_id.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to read coupon"))?;

        tx.rollback()
            .await
            .map_err(db_error("Failed to end redemption"))?;

        let Some(row) = current else {
            return Ok(RedemptionOutcome::Rejected(RedemptionRejection::NotFound));
        };

        match CouponRedemption::try_from(row)?.check(Timestamp::now()) {
            Err(rejection) => Ok(RedemptionOutcome::Rejected(rejection)),
            // Database and process clocks disagree about the expiry instant.
            Ok(()) => Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Coupon {} was eligible but not redeemed", coupon_id),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::redemption::MAX_REDEEMED_COUNT;

    fn row(state: &str, redeemed_count: i32, max_redemption: Option<i32>) -> CouponRow {
        CouponRow {
            coupon_id: "SPRING-10".to_string(),
            coupon_state: state.to_string(),
            redeemed_count,
            single_use: false,
            max_redemption,
            expires_at: None,
        }
    }

    #[test]
    fn row_maps_to_redemption_record() {
        let record = CouponRedemption::try_from(row("used", 3, Some(3))).unwrap();

        assert_eq!(record.state, CouponState::Used);
        assert_eq!(record.redeemed_count, 3);
        assert_eq!(record.policy, RedemptionPolicy::limited(3));
    }

    #[test]
    fn unknown_state_is_a_database_error() {
        let err = CouponRedemption::try_from(row("redeemed", 0, None)).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn negative_count_is_a_database_error() {
        let err = CouponRedemption::try_from(row("active", -1, None)).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn counter_ceiling_matches_domain_maximum() {
        assert_eq!(u32::try_from(COUNTER_CEILING).unwrap(), MAX_REDEEMED_COUNT);
    }

    #[test]
    fn row_at_counter_ceiling_classifies_as_limit_exceeded() {
        let record = CouponRedemption::try_from(row("active", COUNTER_CEILING, None)).unwrap();

        assert_eq!(
            record.check(Timestamp::now()),
            Err(RedemptionRejection::LimitExceeded)
        );
    }
}
