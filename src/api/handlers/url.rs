//! Handlers for URL processing endpoints.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use validator::Validate;

use crate::api::dto::envelope::ApiResponse;
use crate::api::dto::url::{UrlRequest, UrlResponse};
use crate::api::middleware::client_info::ClientInfo;
use crate::domain::entities::UrlProcessStats;
use crate::error::AppError;
use crate::state::AppState;

/// Normalizes a URL.
///
/// # Endpoint
///
/// `POST /api/v1/process-url`
///
/// # Request Body
///
/// ```json
/// { "url": "https://BYFOOD.com/food-EXPeriences?query=abc/", "operation": "all" }
/// ```
///
/// `operation` is one of `canonical`, `redirection`, `all`.
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "original_url": "https://BYFOOD.com/food-EXPeriences?query=abc/",
///   "processed_url": "https://www.byfood.com/food-experiences",
///   "operation": "all",
///   "log_id": 12
/// }
/// ```
///
/// `log_id` is omitted when the call could not be recorded; the result is
/// returned either way.
///
/// # Errors
///
/// - 400 `VALIDATION_FAILED` on a malformed body
/// - 400 `INVALID_OPERATION` for an unknown operation
/// - 400 `INVALID_URL` if the URL cannot be parsed
pub async fn process_url_handler(
    State(state): State<AppState>,
    ClientInfo(origin): ClientInfo,
    payload: Result<Json<UrlRequest>, JsonRejection>,
) -> Result<Json<UrlResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let result = state
        .url_service
        .process(&payload.url, &payload.operation, origin)
        .await?;

    Ok(Json(result.into()))
}

/// Returns usage counts for the URL processor.
///
/// # Endpoint
///
/// `GET /api/v1/url-stats`
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "message": "Statistics retrieved successfully",
///   "data": { "total_requests": 3, "by_operation": { "all": 2, "canonical": 1 } }
/// }
/// ```
pub async fn url_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UrlProcessStats>>, AppError> {
    let stats = state.url_service.stats().await?;

    Ok(Json(
        ApiResponse::data(stats).with_message("Statistics retrieved successfully"),
    ))
}
