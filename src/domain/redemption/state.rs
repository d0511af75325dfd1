//! Coupon redemption state machine.
//!
//! ```text
//! active --(redeem, count < limit)--> active
//! active --(redeem, reaches limit or single use)--> used
//! active --(deactivated by store)--> inactive
//! ```
//!
//! `used` and `inactive` are terminal. Nothing returns a coupon to `active`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Redemption state of a coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponState {
    /// Redeemable while allowance remains.
    Active,

    /// Allowance exhausted.
    Used,

    /// Withdrawn by the store. Never redeemable.
    Inactive,
}

impl CouponState {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CouponState::Active => "active",
            CouponState::Used => "used",
            CouponState::Inactive => "inactive",
        }
    }
}

impl fmt::Display for CouponState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CouponState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CouponState::Active),
            "used" => Ok(CouponState::Used),
            "inactive" => Ok(CouponState::Inactive),
            other => Err(ValidationError::invalid_format(
                "coupon_state",
                format!("unknown state '{}'", other),
            )),
        }
    }
}

impl StateMachine for CouponState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use CouponState::*;
        matches!(
            (self, target),
            (Active, Active) // Partial redemption
                | (Active, Used)
                | (Active, Inactive)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use CouponState::*;
        match self {
            Active => vec![Active, Used, Inactive],
            Used | Inactive => vec![],
        }
    }
}
