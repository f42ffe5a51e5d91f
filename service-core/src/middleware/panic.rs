use crate::error::AppError;
use axum::response::{IntoResponse, Response};
use std::any::Any;

/// Response builder for `tower_http::catch_panic::CatchPanicLayer::custom`.
///
/// A panicking handler still answers with the usual JSON error envelope.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unexpected error".to_string()
    };

    tracing::error!(error = %message, "Handler panicked");

    AppError::InternalError(anyhow::anyhow!(message)).into_response()
}
