//! URL normalization with usage recording.

use std::sync::Arc;

use serde::Serialize;

use crate::application::services::usage_recorder::UsageRecorder;
use crate::domain::entities::{NewUrlProcessLog, UrlProcessStats};
use crate::domain::repositories::UrlLogRepository;
use crate::error::AppError;
use crate::utils::url_normalizer::{UrlOperation, normalize};

/// Where a normalization request came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOrigin {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Outcome of [`UrlService::process`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedUrl {
    pub original_url: String,
    pub processed_url: String,
    pub operation: UrlOperation,
    /// Id of the audit entry, absent when recording failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_id: Option<i64>,
}

pub struct UrlService<R: UrlLogRepository + ?Sized> {
    repository: Arc<R>,
    recorder: UsageRecorder<R>,
}

impl<R: UrlLogRepository + ?Sized> UrlService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            recorder: UsageRecorder::new(Arc::clone(&repository)),
            repository,
        }
    }

    /// Normalizes `url` with the operation named by `operation` and records
    /// the call.
    ///
    /// The operation name is checked before the URL is parsed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidOperation`] for an unknown operation name.
    /// Returns [`AppError::InvalidUrl`] if `url` cannot be parsed or has no host.
    /// Recording failures are never returned.
    pub async fn process(
        &self,
        url: &str,
        operation: &str,
        origin: RequestOrigin,
    ) -> Result<ProcessedUrl, AppError> {
        let operation: UrlOperation = operation.parse()?;
        let processed_url = normalize(url, operation)?;

        metrics::counter!("url_process_total", "operation" => operation.as_str()).increment(1);
        tracing::debug!(%operation, original = url, processed = %processed_url, "URL processed");

        let log_id = self
            .recorder
            .record(NewUrlProcessLog {
                original_url: url.to_string(),
                processed_url: processed_url.clone(),
                operation,
                ip_address: origin.ip_address,
                user_agent: origin.user_agent,
            })
            .await;

        Ok(ProcessedUrl {
            original_url: url.to_string(),
            processed_url,
            operation,
            log_id,
        })
    }

    /// Aggregated counts over recorded normalizations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn stats(&self) -> Result<UrlProcessStats, AppError> {
        self.repository.stats().await
    }
}
