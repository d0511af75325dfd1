//! HTTP handlers for identity endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::application::IdentityService;

use super::dto::{CredentialRequest, LoginResponse, PasswordResetRequest, SignupResponse};

/// POST /api/identity/signup
pub async fn signup(
    State(identity): State<IdentityService>,
    Json(request): Json<CredentialRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = identity
        .create_account(&request.email, &request.password)
        .await?;
    Ok((StatusCode::CREATED, Json(SignupResponse::from(result))))
}

/// POST /api/identity/login
pub async fn login(
    State(identity): State<IdentityService>,
    Json(request): Json<CredentialRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let issued = identity.login(&request.email, &request.password).await?;
    Ok(Json(LoginResponse::from(issued)))
}

/// POST /api/identity/password-reset
pub async fn password_reset(
    State(identity): State<IdentityService>,
    Json(request): Json<PasswordResetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    identity.reset_password(&request.email).await?;
    Ok(StatusCode::ACCEPTED)
}
