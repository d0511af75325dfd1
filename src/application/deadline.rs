//! Deadline applied to every storage call made by the handlers.
//!
//! A storage future that outlives the deadline is dropped and reported as
//! `ErrorCode::StorageTimeout`. Nothing is retried.

use std::future::Future;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Default storage deadline in milliseconds.
pub const DEFAULT_STORAGE_TIMEOUT_MS: u64 = 5_000;

/// Upper bound on how long a single storage call may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageDeadline(Duration);

impl StorageDeadline {
    pub fn new(limit: Duration) -> Self {
        Self(limit)
    }

    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    pub fn limit(&self) -> Duration {
        self.0
    }

    /// Runs `call`, failing with `StorageTimeout` if it does not finish in time.
    pub async fn run<T, F>(&self, operation: &'static str, call: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        match tokio::time::timeout(self.0, call).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::new(
                ErrorCode::StorageTimeout,
                format!("{} exceeded {}ms", operation, self.0.as_millis()),
            )
            .with_detail("operation", operation)),
        }
    }
}

impl Default for StorageDeadline {
    fn default() -> Self {
        Self::from_millis(DEFAULT_STORAGE_TIMEOUT_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_through_results_that_finish_in_time() {
        let deadline = StorageDeadline::from_millis(100);
        let result = deadline.run("lookup", async { Ok::<_, DomainError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn passes_through_errors_that_finish_in_time() {
        let deadline = StorageDeadline::from_millis(100);
        let result: Result<(), _> = deadline
            .run("lookup", async { Err(DomainError::database("boom")) })
            .await;
        assert_eq!(result.unwrap_err().code, ErrorCode::DatabaseError);
    }

    #[tokio::test]
    async fn slow_call_times_out() {
        let deadline = StorageDeadline::from_millis(20);
        let result: Result<(), _> = deadline
            .run("atomic_redeem", async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(())
            })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageTimeout);
        assert_eq!(err.details.get("operation"), Some(&"atomic_redeem".to_string()));
    }

    #[test]
    fn default_is_five_seconds() {
        assert_eq!(StorageDeadline::default().limit(), Duration::from_secs(5));
    }
}
