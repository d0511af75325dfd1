//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - Token codec and password hashing
//! - `http` - axum routes and bearer-token middleware
//! - `memory` - Process-local storage
//! - `postgres` - PostgreSQL storage

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
