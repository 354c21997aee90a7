//! Per-operation deadline enforcement.
//!
//! Every public service operation runs under an independently derived
//! bounded duration. Exceeding it aborts the in-flight store calls and
//! surfaces [`ErrorKind::Timeout`], never a domain kind.

use std::future::Future;
use std::time::Duration;

use crate::error::{AppError, ErrorKind};
use crate::result::AppResult;

/// Run `fut` under the given deadline.
///
/// On expiry the future is dropped (cancelling any in-flight ledger or
/// blob-store call) and a [`ErrorKind::Timeout`] error naming the
/// operation is returned.
pub async fn with_timeout<T, F>(duration: Duration, operation: &str, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(duration, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::new(
            ErrorKind::Timeout,
            format!("operation '{operation}' exceeded its {duration:?} deadline"),
        )),
    }
}
