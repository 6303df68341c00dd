use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value, json};
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::utils::url_normalizer::UrlError;

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Value::is_null")]
    details: Value,
    timestamp: String,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    InvalidUrl { message: String, details: Value },
    InvalidOperation { message: String, details: Value },
    Conflict { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_operation(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidOperation {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::InvalidUrl { .. } | Self::InvalidOperation { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code sent in the `code` field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_FAILED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidUrl { .. } => "INVALID_URL",
            Self::InvalidOperation { .. } => "INVALID_OPERATION",
            Self::Conflict { .. } => "CONFLICT",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. }
            | Self::NotFound { message, .. }
            | Self::InvalidUrl { message, .. }
            | Self::InvalidOperation { message, .. }
            | Self::Conflict { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let (message, details) = match self {
            AppError::Internal { message, details } => {
                // Internal details stay in the log.
                tracing::error!(%message, %details, "internal error");
                (message, Value::Null)
            }
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::InvalidUrl { message, details }
            | AppError::InvalidOperation { message, details }
            | AppError::Conflict { message, details } => (message, details),
        };

        let body = ErrorBody {
            success: false,
            error: message,
            code,
            details,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        };

        (status, Json(body)).into_response()
    }
}

pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }
    }

    AppError::internal("Database error", json!({ "reason": e.to_string() }))
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::bad_request("Validation failed", validation_details(&errors))
    }
}

impl From<UrlError> for AppError {
    fn from(e: UrlError) -> Self {
        match e {
            UrlError::InvalidFormat(_) | UrlError::MissingHost(_) => {
                AppError::invalid_url("Invalid URL", json!({ "reason": e.to_string() }))
            }
            UrlError::InvalidOperation(op) => AppError::invalid_operation(
                "Invalid operation. Must be one of: canonical, redirection, all",
                json!({ "operation": op }),
            ),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(
            "Invalid query parameters",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request(
            "Invalid path parameter",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

/// Flattens validator output into `{ "field": ["message", ...] }`.
fn validation_details(errors: &ValidationErrors) -> Value {
    let mut fields = Map::new();

    for (field, kind) in errors.errors() {
        let messages: Vec<Value> = match kind {
            ValidationErrorsKind::Field(errs) => errs
                .iter()
                .map(|err| {
                    let text = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| default_message(&err.code));
                    Value::String(text)
                })
                .collect(),
            ValidationErrorsKind::Struct(inner) => vec![validation_details(inner)],
            ValidationErrorsKind::List(items) => items
                .values()
                .map(|inner| validation_details(inner))
                .collect(),
        };
        fields.insert(field.to_string(), Value::Array(messages));
    }

    Value::Object(fields)
}

fn default_message(code: &str) -> String {
    match code {
        "length" => "has an invalid length".to_string(),
        "range" => "is out of range".to_string(),
        "url" => "must be a valid URL".to_string(),
        "required" => "is required".to_string(),
        other => format!("failed '{other}' validation"),
    }
}
