//! HTTP handlers for coupon endpoints.

use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::RedemptionEngine;

use super::dto::{CouponStateResponse, VerifyRedemptionResponse};

/// GET /api/coupons/:coupon_id
pub async fn coupon_state(
    State(engine): State<RedemptionEngine>,
    RequireAuth(_identity): RequireAuth,
    Path(coupon_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let state = engine.coupon_state(&coupon_id).await?;
    Ok(Json(CouponStateResponse { coupon_id, state }))
}

/// POST /api/coupons/:coupon_id/verify
pub async fn verify_redemption(
    State(engine): State<RedemptionEngine>,
    RequireAuth(identity): RequireAuth,
    Path(coupon_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let result = engine.verify_redemption(&identity.id, &coupon_id).await?;
    Ok(Json(VerifyRedemptionResponse::new(coupon_id, result)))
}
