//! DTOs for the URL processing endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::ProcessedUrl;

/// Request body for `POST /api/v1/process-url`.
///
/// `operation` stays a plain string so an unknown value is reported as an
/// invalid operation rather than a malformed body.
#[derive(Debug, Deserialize, Validate)]
pub struct UrlRequest {
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,

    #[validate(length(min = 1, message = "Operation is required"))]
    pub operation: String,
}

/// Response body for `POST /api/v1/process-url`.
#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: ProcessedUrl,
}

impl From<ProcessedUrl> for UrlResponse {
    fn from(result: ProcessedUrl) -> Self {
        Self {
            success: true,
            result,
        }
    }
}
