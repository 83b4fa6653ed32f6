// src/handlers/chat.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use validator::Validate;

use crate::{
    ai::TextGenerator,
    error::AppError,
    exam::fallback::FALLBACK_CHAT_REPLY,
    models::{
        chat::{ChatRequest, ChatResponse},
        question::ContentSource,
    },
};

fn chat_prompt(message: &str) -> String {
    format!(
        "You are a friendly career guidance counselor helping a student explore careers, \
         skills and education paths. Answer concisely in plain text.\n\nStudent: {}",
        message.trim()
    )
}

/// Relays a message to the generative provider. Replies with a static message on failure.
pub async fn chat(
    State(generator): State<Arc<dyn TextGenerator>>,
    Json(req): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = req.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let response = match generator.generate(&chat_prompt(&req.message)).await {
        Ok(reply) if !reply.trim().is_empty() => ChatResponse {
            reply: reply.trim().to_string(),
            source: ContentSource::Generated,
        },
        Ok(_) => {
            tracing::warn!("Chat generation returned empty text, using fallback");
            fallback_reply()
        }
        Err(e) => {
            tracing::warn!("Chat generation failed, using fallback: {}", e);
            fallback_reply()
        }
    };

    Ok(Json(response))
}

fn fallback_reply() -> ChatResponse {
    ChatResponse {
        reply: FALLBACK_CHAT_REPLY.to_string(),
        source: ContentSource::Fallback,
    }
}
