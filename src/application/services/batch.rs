use std::future::Future;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::error::AppError;

/// Runs `operations` concurrently and waits for every one of them, also after
/// a failure.
///
/// At most `limit` operations are in flight, `None` starts them all at once.
/// Nothing is spawned, the operations are polled by the caller's task, so none
/// of them can outlive this call.
///
/// # Returns
///
/// The first error by completion order, `Ok(())` when all succeeded.
pub async fn drain_all<I, F>(operations: I, limit: Option<usize>) -> Result<(), AppError>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<(), AppError>>,
{
    let operations: Vec<F> = operations.into_iter().collect();
    let total = operations.len();
    if total == 0 {
        return Ok(());
    }
    let limit = limit.unwrap_or(total).max(1);
    debug!("Draining {} operations, {} at a time", total, limit);

    let mut results = stream::iter(operations).buffer_unordered(limit);
    let mut first_error = None;
    let mut failed = 0usize;

    while let Some(result) = results.next().await {
        if let Err(e) = result {
            failed += 1;
            if first_error.is_none() {
                first_error = Some(e);
            } else {
                warn!("Further failure in batch: {}", e);
            }
        }
    }

    info!("Batch finished: {} of {} succeeded", total - failed, total);
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
