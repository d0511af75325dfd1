//! Command and query handlers.
//!
//! - `identity` - Account creation, login, token verification, password reset
//! - `redemption` - Coupon state lookup and atomic redemption

pub mod identity;
pub mod redemption;

pub use identity::{
    CreateAccountCommand, CreateAccountHandler, CreateAccountResult, IdentityService,
    LoginCommand, LoginHandler, ResetPasswordCommand, ResetPasswordHandler, VerifyTokenHandler,
};
pub use redemption::{
    GetCouponStateHandler, GetCouponStateQuery, RedemptionEngine, VerifyRedemptionCommand,
    VerifyRedemptionHandler, VerifyRedemptionResult,
};
