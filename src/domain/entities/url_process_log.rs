//! Audit record written for each URL normalization.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::book::Lifecycle;
use crate::utils::url_normalizer::UrlOperation;

/// A persisted URL processing log entry.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlProcessLog {
    pub id: i64,
    pub original_url: String,
    pub processed_url: String,
    pub operation: UrlOperation,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lifecycle: Lifecycle,
}

/// Input data for recording a normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUrlProcessLog {
    pub original_url: String,
    pub processed_url: String,
    pub operation: UrlOperation,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Aggregated counts over live log entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UrlProcessStats {
    pub total_requests: i64,
    pub by_operation: BTreeMap<String, i64>,
}
