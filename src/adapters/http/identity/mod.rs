//! HTTP adapter for identity endpoints.
//!
//! - `POST /api/identity/signup` - Create an account
//! - `POST /api/identity/login` - Exchange a credential for a bearer token
//! - `POST /api/identity/password-reset` - Request a password reset

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::identity_routes;
