//! HTTP adapter for coupon endpoints. Both routes require a bearer token.
//!
//! - `GET /api/coupons/:coupon_id` - Current coupon state
//! - `POST /api/coupons/:coupon_id/verify` - Redeem one unit of the coupon

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::redemption_routes;
