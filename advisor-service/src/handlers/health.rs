use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

/// Fixed liveness payload; touches no other component.
pub async fn test_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "Server is running",
            "message": "API is operational"
        })),
    )
}

/// Health check endpoint for Docker/K8s liveness probes.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "advisor-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

pub async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Resource not found"))
}
