//! Redemption-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | CouponNotValid | 404 |
//! | CouponIsUsed | 409 |
//! | CouponLimitExceeded | 409 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

use super::RedemptionRejection;

/// Closed set of redemption failures surfaced to callers.
///
/// The three coupon variants are business-rule rejections and stay
/// distinguishable so callers can render the right message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RedemptionError {
    #[error("coupon is not valid")]
    CouponNotValid,

    #[error("coupon has already been used")]
    CouponIsUsed,

    #[error("coupon redemption limit exceeded")]
    CouponLimitExceeded,

    #[error("unable to process request")]
    Infrastructure,
}

impl RedemptionError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            RedemptionError::CouponNotValid => ErrorCode::CouponNotValid,
            RedemptionError::CouponIsUsed => ErrorCode::CouponIsUsed,
            RedemptionError::CouponLimitExceeded => ErrorCode::CouponLimitExceeded,
            RedemptionError::Infrastructure => ErrorCode::InternalError,
        }
    }
}

impl From<RedemptionRejection> for RedemptionError {
    fn from(rejection: RedemptionRejection) -> Self {
        match rejection {
            RedemptionRejection::NotFound
            | RedemptionRejection::Inactive
            | RedemptionRejection::Expired => RedemptionError::CouponNotValid,
            RedemptionRejection::LimitExceeded => RedemptionError::CouponLimitExceeded,
            RedemptionRejection::AlreadyUsed => RedemptionError::CouponIsUsed,
        }
    }
}

impl From<DomainError> for RedemptionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::CouponNotValid => RedemptionError::CouponNotValid,
            ErrorCode::CouponIsUsed => RedemptionError::CouponIsUsed,
            ErrorCode::CouponLimitExceeded => RedemptionError::CouponLimitExceeded,
            _ => RedemptionError::Infrastructure,
        }
    }
}

impl From<RedemptionError> for DomainError {
    fn from(err: RedemptionError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
