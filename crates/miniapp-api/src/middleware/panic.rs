//! Panic boundary.
//!
//! A panicking handler or port is answered with the generic
//! `INTERNAL_ERROR` body; the panic message only reaches the log.

use crate::domain::error::ApiError;
use axum::response::{IntoResponse, Response};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;

/// Layer converting panics into [`ApiError::internal`] responses
pub fn create_panic_layer() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(panic_response as fn(Box<dyn Any + Send + 'static>) -> Response)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    error!(panic = details, "Request handler panicked");
    ApiError::internal().into_response()
}
