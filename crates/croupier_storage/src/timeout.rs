//! Timeout boundary for provider calls.

use croupier_error::{CroupierResult, StorageError, StorageErrorKind};
use std::future::Future;
use std::time::Duration;

/// Run `call` under `limit`, mapping expiry to [`StorageErrorKind::Timeout`].
pub(crate) async fn bounded<T>(
    operation: &str,
    limit: Duration,
    call: impl Future<Output = CroupierResult<T>>,
) -> CroupierResult<T> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(operation, timeout_secs = limit.as_secs(), "Storage call timed out");
            Err(StorageError::new(StorageErrorKind::Timeout(
                operation.to_string(),
                limit.as_secs(),
            ))
            .into())
        }
    }
}

/// Map a transport failure to [`StorageErrorKind::Unavailable`].
#[track_caller]
pub(crate) fn unavailable(context: &str, err: impl std::fmt::Display) -> StorageError {
    StorageError::new(StorageErrorKind::Unavailable(format!("{}: {}", context, err)))
}

/// Turn a non-success response into [`StorageErrorKind::Unavailable`].
pub(crate) async fn check_status(
    context: &str,
    response: reqwest::Response,
) -> CroupierResult<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::error!(status = %status, body = %body, context, "Provider returned error");
    Err(StorageError::new(StorageErrorKind::Unavailable(format!(
        "{} returned {}: {}",
        context, status, body
    )))
    .into())
}
