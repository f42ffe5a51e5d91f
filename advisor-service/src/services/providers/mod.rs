//! Upstream text-generation providers.
//!
//! Handlers talk to a [`TextProvider`]; the Gemini implementation performs the
//! real HTTP call and the mock is used by tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Connection failure, timeout, DNS failure, undecodable body.
    #[error("{0}")]
    Transport(String),

    /// Upstream answered with a non-2xx status.
    #[error("upstream returned {status}: {body}")]
    Http { status: u16, body: String },

    /// The response did not contain `candidates[0].content.parts[0].text`.
    #[error("no recommendation generated")]
    Format,
}

impl ProviderError {
    /// Transport and HTTP failures are reported as request errors; a missing
    /// candidate is reported as "nothing generated".
    pub fn is_request_failure(&self) -> bool {
        matches!(self, ProviderError::Transport(_) | ProviderError::Http { .. })
    }
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send `prompt` upstream once and return the raw first text part.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}
