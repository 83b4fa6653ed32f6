// src/ai/mod.rs

pub mod gemini;

use std::fmt;

use async_trait::async_trait;

pub use gemini::GeminiClient;

/// A generative text endpoint: one prompt in, one completion out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Every way a call to the generative provider (or the parsing of its output) can fail.
#[derive(Debug)]
pub enum ProviderError {
    /// No API key configured. Raised before any network call.
    MissingApiKey,
    /// The configured base URL cannot carry a path.
    InvalidEndpoint(String),
    Http(reqwest::Error),
    /// Non-success status with the response body.
    Status(u16, String),
    /// The response carried no candidate text.
    EmptyResponse,
    /// The completion text could not be parsed as JSON.
    Malformed(String),
    /// The completion parsed, but not into an array.
    NotAnArray,
    /// The array held no usable questions.
    NoUsableQuestions,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::MissingApiKey => write!(f, "generative provider API key is not set"),
            ProviderError::InvalidEndpoint(url) => write!(f, "invalid provider endpoint: {}", url),
            ProviderError::Http(e) => write!(f, "provider request failed: {}", e),
            ProviderError::Status(code, body) => {
                write!(f, "provider responded with status {}: {}", code, body)
            }
            ProviderError::EmptyResponse => write!(f, "provider returned no text"),
            ProviderError::Malformed(msg) => write!(f, "provider output is not valid JSON: {}", msg),
            ProviderError::NotAnArray => write!(f, "provider output is not a JSON array"),
            ProviderError::NoUsableQuestions => write!(f, "provider output held no usable questions"),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Http(err)
    }
}
