//! Authentication middleware and extractors for axum.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedIdentity into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```
//!
//! Only layered over routes that need an identity. A missing
//! `Authorization` header passes through so `RequireAuth` can answer with
//! `UNAUTHENTICATED`. A header carrying a token the identity service
//! rejects is answered with 401 right away. The reason is never echoed.

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::IdentityService;
use crate::domain::foundation::ErrorCode;
use crate::domain::identity::AuthenticatedIdentity;

use crate::adapters::http::error::ErrorResponse;

/// Returns the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Validates bearer tokens and injects `AuthenticatedIdentity`.
pub async fn auth_middleware(
    State(identity): State<IdentityService>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        return next.run(request).await;
    };

    match identity.verify_token(token) {
        Some(id) => {
            request
                .extensions_mut()
                .insert(AuthenticatedIdentity::new(id));
            next.run(request).await
        }
        None => AuthRejection::InvalidToken.into_response(),
    }
}

/// Extractor that requires a verified identity.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedIdentity);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// No bearer token was provided.
    Unauthenticated,
    /// A bearer token was provided but did not verify.
    InvalidToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = match self {
            AuthRejection::Unauthenticated => ErrorResponse::new(
                ErrorCode::Unauthenticated.to_string(),
                "Authentication required",
            ),
            AuthRejection::InvalidToken => {
                ErrorResponse::new(ErrorCode::InvalidToken.to_string(), "Invalid token")
            }
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}
