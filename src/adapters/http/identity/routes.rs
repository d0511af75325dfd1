//! Axum router configuration for identity endpoints.

use axum::{routing::post, Router};

use crate::application::IdentityService;

use super::handlers::{login, password_reset, signup};

/// Public identity routes, mounted at `/api/identity`.
pub fn identity_routes() -> Router<IdentityService> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/password-reset", post(password_reset))
}
