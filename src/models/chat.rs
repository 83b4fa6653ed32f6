// src/models/chat.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::ContentSource;

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 4000,
        message = "message is required and must be at most 4000 chars"
    ))]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    /// `generated` when the provider answered, `fallback` otherwise.
    pub source: ContentSource,
}
