//! Per-request deadline for use-case calls.
//!
//! The use-case future is dropped when the deadline elapses. Any unit of work
//! it held open is abandoned with it and rolls back.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::domain::StoreError;

use super::error::ApiError;

/// Await `work`, failing with `DeadlineExceeded` once `limit` elapses.
pub async fn with_deadline<T, Fut>(limit: Duration, work: Fut) -> Result<T, ApiError>
where
    Fut: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, work).await {
        Ok(outcome) => outcome.map_err(ApiError::from),
        Err(_) => {
            warn!(limit_ms = limit.as_millis(), "request deadline exceeded");
            Err(ApiError::from(StoreError::deadline_exceeded()))
        }
    }
}
