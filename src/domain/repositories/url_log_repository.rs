//! Repository trait for URL processing logs.

use crate::domain::entities::{NewUrlProcessLog, UrlProcessLog, UrlProcessStats};
use crate::error::AppError;
use async_trait::async_trait;

/// Append-only store for URL normalization audit records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlLogRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlLogRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlLogRepository: Send + Sync {
    /// Appends a log entry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record(&self, entry: NewUrlProcessLog) -> Result<UrlProcessLog, AppError>;

    /// Aggregates live entries: total count and count per operation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn stats(&self) -> Result<UrlProcessStats, AppError>;
}
