//! Axum router configuration for coupon endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::application::RedemptionEngine;

use super::handlers::{coupon_state, verify_redemption};

/// Coupon routes, mounted at `/api/coupons`.
pub fn redemption_routes() -> Router<RedemptionEngine> {
    Router::new()
        .route("/:coupon_id", get(coupon_state))
        .route("/:coupon_id/verify", post(verify_redemption))
}
