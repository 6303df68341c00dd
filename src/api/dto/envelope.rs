//! Success envelope shared by all JSON endpoints.

use serde::Serialize;

use crate::domain::query::QuerySpec;

/// `{ "success": true, "data": ..., "message": ... }`
///
/// Listing responses also carry `total`, `page` and `limit`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            total: None,
            page: None,
            limit: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_total(mut self, total: i64) -> Self {
        self.total = Some(total);
        self
    }

    /// Adds `total`, `page` and `limit` for a paginated listing.
    pub fn with_page(mut self, query: &QuerySpec, total: i64) -> Self {
        self.total = Some(total);
        self.page = Some(query.page());
        self.limit = Some(query.limit);
        self
    }
}

impl ApiResponse<()> {
    /// Envelope with a message and no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            total: None,
            page: None,
            limit: None,
        }
    }
}
