// src/handlers/updates.rs

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError, models::update::CreateUpdateRequest, store::UpdateStore,
    utils::html::clean_html,
};

/// Lists community updates, newest first.
pub async fn list_updates(
    State(store): State<Arc<dyn UpdateStore>>,
) -> Result<impl IntoResponse, AppError> {
    let updates = store.list_updates().await?;
    Ok(Json(serde_json::json!({ "updates": updates })))
}

/// Publishes an update and its broadcast notification.
pub async fn create_update(
    State(store): State<Arc<dyn UpdateStore>>,
    Json(mut payload): Json<CreateUpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    payload.content = clean_html(&payload.content);
    if payload.content.trim().is_empty() {
        return Err(AppError::BadRequest(
            "content is empty after sanitization".to_string(),
        ));
    }

    let update = store.publish_update(&payload).await?;
    tracing::info!("Published update {}: {}", update.id, update.title);

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "update": update })),
    ))
}
