//! Gemini AI provider implementation.
//!
//! Issues a single `generateContent` call per prompt, bounded by the configured
//! timeout, and pulls the first text part out of the first candidate.

use super::{ProviderError, TextProvider};
use crate::config::GeminiSettings;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::error::Error as _;
use std::time::Duration;

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
}

impl From<&GeminiSettings> for GeminiConfig {
    fn from(settings: &GeminiSettings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            timeout: settings.timeout(),
        }
    }
}

/// Gemini text provider.
pub struct GeminiTextProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiTextProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Transport(describe(e)))?;

        Ok(Self { config, client })
    }

    /// Build the API URL for the given method. The key travels as a query parameter.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.api_base, self.config.model, method
        )
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url("generateContent"))
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(describe(e)))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received response from Gemini API");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body,
            });
        }

        // Only a body that is not JSON at all is a transport failure; any JSON
        // value of the wrong shape is a format failure.
        let api_response: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Transport(describe(e)))?;

        first_text(&api_response).ok_or(ProviderError::Format)
    }
}

/// Render a reqwest error with its cause chain, minus the URL (it carries the key).
fn describe(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

/// `candidates[0].content.parts[0].text`, if every segment is present and a
/// string. Missing keys, nulls, empty arrays and wrong types all yield `None`.
fn first_text(response: &Value) -> Option<String> {
    response
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_matches_wire_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hello".to_string(),
                }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "contents": [ { "parts": [ { "text": "hello" } ] } ] })
        );
    }

    #[test]
    fn extracts_first_text_part() {
        let response = json!({
            "candidates": [
                { "content": { "parts": [ { "text": "first" }, { "text": "second" } ] } },
                { "content": { "parts": [ { "text": "other" } ] } }
            ]
        });
        assert_eq!(first_text(&response).as_deref(), Some("first"));
    }

    #[test]
    fn missing_segments_yield_none() {
        let shapes = [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [ {} ] }),
            json!({ "candidates": [ { "content": {} } ] }),
            json!({ "candidates": [ { "content": { "parts": [ {} ] } } ] }),
        ];
        for shape in shapes {
            assert_eq!(first_text(&shape), None, "{shape}");
        }
    }

    #[test]
    fn wrong_typed_segments_yield_none() {
        let shapes = [
            json!(null),
            json!([1, 2]),
            json!({ "candidates": null }),
            json!({ "candidates": { "content": {} } }),
            json!({ "candidates": [ { "content": { "parts": "x" } } ] }),
            json!({ "candidates": [ { "content": { "parts": [ { "text": 5 } ] } } ] }),
            json!({ "candidates": [ { "content": { "parts": [ { "text": null } ] } } ] }),
        ];
        for shape in shapes {
            assert_eq!(first_text(&shape), None, "{shape}");
        }
    }

    #[test]
    fn api_url_targets_generate_content() {
        let provider = GeminiTextProvider::new(GeminiConfig {
            api_key: "secret".to_string(),
            api_base: "http://localhost:9000/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            timeout: Duration::from_secs(15),
        })
        .unwrap();
        assert_eq!(
            provider.api_url("generateContent"),
            "http://localhost:9000/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn settings_convert_without_trailing_slash() {
        let settings = GeminiSettings {
            api_key: "k".to_string(),
            api_base: "http://example.test/v1beta/".to_string(),
            model: "m".to_string(),
            timeout_seconds: 3,
        };
        let config = GeminiConfig::from(&settings);
        assert_eq!(config.api_base, "http://example.test/v1beta");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }
}
