//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Every storage call it makes runs under a `StorageDeadline`.

mod deadline;
pub mod handlers;

pub use deadline::{StorageDeadline, DEFAULT_STORAGE_TIMEOUT_MS};
pub use handlers::{IdentityService, RedemptionEngine, VerifyRedemptionResult};
