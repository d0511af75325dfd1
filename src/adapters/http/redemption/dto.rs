//! Response bodies for coupon endpoints.

use serde::{Deserialize, Serialize};

use crate::application::VerifyRedemptionResult;
use crate::domain::redemption::CouponState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponStateResponse {
    pub coupon_id: String,
    pub state: CouponState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRedemptionResponse {
    pub coupon_id: String,
    pub state: CouponState,
    pub redeemed_count: u32,
}

impl VerifyRedemptionResponse {
    pub fn new(coupon_id: String, result: VerifyRedemptionResult) -> Self {
        Self {
            coupon_id,
            state: result.state,
            redeemed_count: result.redeemed_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_serializes_lowercase() {
        let response = CouponStateResponse {
            coupon_id: "SPRING-10".to_string(),
            state: CouponState::Used,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["state"], "used");
    }
}
