//! Best-effort audit logging for URL normalizations.

use std::sync::Arc;

use crate::domain::entities::NewUrlProcessLog;
use crate::domain::repositories::UrlLogRepository;

/// Appends a [`NewUrlProcessLog`] per normalization without ever failing the
/// caller.
pub struct UsageRecorder<R: UrlLogRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UrlLogRepository + ?Sized> UsageRecorder<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Records `entry` and returns the new log id.
    ///
    /// Store failures are logged at `warn`, counted in
    /// `url_process_log_failures_total` and reported as `None`.
    pub async fn record(&self, entry: NewUrlProcessLog) -> Option<i64> {
        let operation = entry.operation;

        match self.repository.record(entry).await {
            Ok(log) => Some(log.id),
            Err(e) => {
                metrics::counter!("url_process_log_failures_total").increment(1);
                tracing::warn!(
                    operation = %operation,
                    error = %e,
                    "Failed to record URL processing log"
                );
                None
            }
        }
    }
}
