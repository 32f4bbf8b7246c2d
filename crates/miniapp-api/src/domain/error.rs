//! API error types and their HTTP mapping.
//!
//! Handlers return typed failures; this is the only place they become
//! status codes and JSON bodies.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Machine-readable error codes carried in every error body
pub mod codes {
    pub const AUTH_INVALID: &str = "AUTH_INVALID";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const UPSTREAM_ERROR: &str = "UPSTREAM_ERROR";
    pub const REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// API error with HTTP status
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code
    pub status: StatusCode,
    /// Error code from [`codes`]
    pub code: &'static str,
    /// Human-readable message
    pub message: String,
}

/// JSON body of an error response
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    success: bool,
    message: &'a str,
    code: &'a str,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// Init data failed verification
    pub fn auth_invalid() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            codes::AUTH_INVALID,
            "Invalid Telegram data",
        )
    }

    /// Verified payload carried an undecodable user record
    pub fn decode(details: impl fmt::Display) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::DECODE_ERROR,
            format!("Failed to decode user data: {details}"),
        )
    }

    /// Malformed request body or query
    pub fn bad_request(status: StatusCode, details: impl Into<String>) -> Self {
        Self::new(status, codes::BAD_REQUEST, details)
    }

    /// Outbound collaborator failed
    pub fn upstream(details: impl fmt::Display) -> Self {
        Self::new(
            StatusCode::BAD_GATEWAY,
            codes::UPSTREAM_ERROR,
            format!("Upstream error: {details}"),
        )
    }

    /// Request did not finish within its budget
    pub fn timeout(budget: Duration) -> Self {
        Self::new(
            StatusCode::REQUEST_TIMEOUT,
            codes::REQUEST_TIMEOUT,
            format!("Request exceeded {}ms timeout", budget.as_millis()),
        )
    }

    /// Generic failure; the details are logged, never returned
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::INTERNAL_ERROR,
            "Internal server error",
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}] {}", self.status.as_u16(), self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            message: &self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.status(), rejection.body_text())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Service-level errors (startup and serving, not per request)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server stopped with an I/O error
    #[error("server error: {0}")]
    Serve(String),
}
