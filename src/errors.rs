use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Bad request error (malformed body, invalid format).
    BadRequest(String),
    /// One or more required fields were missing or empty.
    MissingFields(Vec<&'static str>),
    /// A field carried a value outside its allowed set.
    InvalidField(&'static str),
    /// The endpoint does not accept the request method.
    MethodNotAllowed,
    /// Internal server error.
    ///
    /// `message` is what the caller sees; `detail` is only logged.
    InternalError {
        message: &'static str,
        detail: String,
    },
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::MissingFields(fields) => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
            AppError::InvalidField(field) => write!(f, "Invalid value for field: {}", field),
            AppError::MethodNotAllowed => write!(f, "Method not allowed"),
            AppError::InternalError { message, detail } => {
                write!(f, "Internal error: {} ({})", message, detail)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Internal errors are logged with their detail and reported to the
    /// caller with an opaque message only.
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::MissingFields(fields) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Missing required fields",
                    "missingFields": fields,
                }),
            ),
            AppError::InvalidField(field) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Invalid value for field",
                    "field": field,
                }),
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({ "error": "Method not allowed" }),
            ),
            AppError::InternalError { message, detail } => {
                tracing::error!("Internal error: {} -> {}", message, detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Internal server error",
                        "message": message,
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Extension trait for turning collaborator failures into an opaque
/// internal error. Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Replace the error with `AppError::InternalError`, keeping its text as
    /// the logged detail.
    fn or_internal(self, message: &'static str) -> Result<T, AppError>;
}

impl<T, E: fmt::Display> ResultExt<T> for Result<T, E> {
    fn or_internal(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| AppError::InternalError {
            message,
            detail: e.to_string(),
        })
    }
}
