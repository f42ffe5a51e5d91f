//! `POST /analyze`: recommendation for a set of sensor readings.

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use serde_json::{Map, Value};
use service_core::error::AppError;

use crate::{
    models::SensorReading,
    services::{build_recommendation_prompt, normalize},
    startup::AppState,
};

pub const NO_DATA_MESSAGE: &str = "No data received or invalid JSON format";
pub const NO_RECOMMENDATION_MESSAGE: &str = "No recommendation generated from API";

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub recommendation: String,
}

/// Accepts the body regardless of content type. Empty, malformed, `null`,
/// `{}` and non-object bodies are all "no data".
fn parse_body(body: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice::<Value>(body).ok()? {
        Value::Object(map) if !map.is_empty() => Some(map),
        _ => None,
    }
}

pub async fn analyze(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalyzeResponse>, AppError> {
    tracing::debug!(body_len = body.len(), "Received analyze request");

    let payload = parse_body(&body).ok_or_else(|| {
        tracing::error!("No JSON data received or invalid JSON");
        AppError::BadRequest(anyhow::anyhow!(NO_DATA_MESSAGE))
    })?;

    let reading = SensorReading::from_json(&payload).map_err(|e| {
        tracing::error!(error = %e, "Invalid sensor value in analyze request");
        AppError::BadRequest(anyhow::Error::new(e))
    })?;

    let prompt = build_recommendation_prompt(&reading);
    tracing::debug!(?reading, prompt_len = prompt.len(), "Requesting recommendation");

    match state.text_provider.generate(&prompt).await {
        Ok(text) => {
            let recommendation = normalize(&text);
            tracing::debug!(
                recommendation_len = recommendation.len(),
                "Processed recommendation"
            );
            Ok(Json(AnalyzeResponse { recommendation }))
        }
        Err(e) if e.is_request_failure() => {
            tracing::error!(error = %e, "Request to Gemini API failed");
            Err(AppError::InternalError(anyhow::anyhow!(
                "API request error: {}",
                e
            )))
        }
        Err(e) => {
            tracing::error!(error = %e, "Unexpected API response format");
            Err(AppError::InternalError(anyhow::anyhow!(
                NO_RECOMMENDATION_MESSAGE
            )))
        }
    }
}
