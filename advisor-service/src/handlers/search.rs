//! `GET /search`: information about a free-text term in light of the readings.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Serialize;
use service_core::error::AppError;

use crate::{
    models::SensorReading,
    services::{build_search_prompt, normalize},
    startup::AppState,
};

pub const NO_TERM_MESSAGE: &str = "No search term provided";

/// Raw query parameters; numeric values are parsed after the term check.
#[derive(Debug, Default, PartialEq)]
pub struct SearchParams {
    pub term: Option<String>,
    pub ph: Option<String>,
    pub tds: Option<String>,
    pub temp: Option<String>,
    pub hum: Option<String>,
}

impl SearchParams {
    /// Collect known keys from decoded pairs. A repeated key keeps its first
    /// value; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "term" => &mut params.term,
                "ph" => &mut params.ph,
                "tds" => &mut params.tds,
                "temp" => &mut params.temp,
                "hum" => &mut params.hum,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub result: String,
}

pub async fn search(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    tracing::debug!("Received search request");

    let Query(pairs) = pairs.map_err(|e| {
        tracing::error!(error = %e, "Malformed search query");
        AppError::BadRequest(anyhow::anyhow!("Invalid query string: {}", e.body_text()))
    })?;
    let params = SearchParams::from_pairs(pairs);

    let term = match params.term.as_deref() {
        Some(term) if !term.is_empty() => term.to_string(),
        _ => return Err(AppError::BadRequest(anyhow::anyhow!(NO_TERM_MESSAGE))),
    };
    tracing::debug!(term = %term, "Search term");

    let reading = SensorReading::from_query(
        params.ph.as_deref(),
        params.tds.as_deref(),
        params.temp.as_deref(),
        params.hum.as_deref(),
    )
    .map_err(|e| {
        tracing::error!(error = %e, "Invalid sensor value");
        AppError::BadRequest(anyhow::anyhow!("Invalid sensor value: {}", e))
    })?;

    let prompt = build_search_prompt(&term, &reading);
    tracing::debug!(?reading, prompt_len = prompt.len(), "Requesting search result");

    match state.text_provider.generate(&prompt).await {
        Ok(text) => Ok(Json(SearchResponse {
            result: normalize(&text),
        })),
        Err(e) if e.is_request_failure() => {
            tracing::error!(error = %e, "Request to Gemini API failed");
            Err(AppError::InternalError(anyhow::anyhow!(
                "API request error: {}",
                e
            )))
        }
        Err(e) => {
            // "Nothing generated" is a 404 here, unlike /analyze.
            tracing::error!(error = %e, "No valid information found in API response");
            Err(AppError::NotFound(anyhow::anyhow!(
                "No information found for '{}'",
                term
            )))
        }
    }
}
