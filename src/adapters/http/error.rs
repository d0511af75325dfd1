//! Mapping from core errors to HTTP responses.
//!
//! Bodies are `{"error_code": ..., "message": ...}`. Infrastructure
//! failures only ever carry the opaque message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::identity::IdentityError;
use crate::domain::redemption::RedemptionError;

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

/// API error type that converts core errors to HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    Identity(IdentityError),
    Redemption(RedemptionError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Identity(err) => match err {
                IdentityError::InvalidEmail | IdentityError::PasswordLengthUnacceptable => {
                    StatusCode::BAD_REQUEST
                }
                IdentityError::IdentityDoesNotExist => StatusCode::UNAUTHORIZED,
                IdentityError::IdentityAlreadyExists => StatusCode::CONFLICT,
                IdentityError::TokenIssuanceFailed | IdentityError::Infrastructure => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Redemption(err) => match err {
                RedemptionError::CouponNotValid => StatusCode::NOT_FOUND,
                RedemptionError::CouponIsUsed | RedemptionError::CouponLimitExceeded => {
                    StatusCode::CONFLICT
                }
                RedemptionError::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::Identity(err) => ErrorResponse::new(err.code().to_string(), err.to_string()),
            ApiError::Redemption(err) => ErrorResponse::new(err.code().to_string(), err.to_string()),
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        ApiError::Identity(err)
    }
}

impl From<RedemptionError> for ApiError {
    fn from(err: RedemptionError) -> Self {
        ApiError::Redemption(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
