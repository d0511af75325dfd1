//! HTTP adapters - REST API implementations.
//!
//! A thin shell over `IdentityService` and `RedemptionEngine`. Handlers
//! translate JSON to calls and errors to status codes and nothing more.

pub mod error;
pub mod identity;
pub mod middleware;
pub mod redemption;

use std::time::Duration;

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::application::{IdentityService, RedemptionEngine};

pub use error::{ApiError, ErrorResponse};
pub use identity::identity_routes;
pub use middleware::{auth_middleware, RequireAuth};
pub use redemption::redemption_routes;

/// Builds the complete application router.
///
/// # Routes
/// - `GET /health`
/// - `/api/identity/*` - public identity routes
/// - `/api/coupons/*` - coupon routes, bearer token required
pub fn router(
    identity: IdentityService,
    redemption: RedemptionEngine,
    request_timeout: Duration,
) -> Router {
    let coupons = redemption_routes()
        .route_layer(from_fn_with_state(identity.clone(), auth_middleware))
        .with_state(redemption);
    let api = Router::new()
        .nest("/identity", identity_routes().with_state(identity))
        .nest("/coupons", coupons);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
