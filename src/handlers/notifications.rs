// src/handlers/notifications.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::notification::{MarkAllReadRequest, NotificationListParams},
    store::NotificationStore,
};

/// Lists a user's notifications together with broadcasts.
pub async fn list_notifications(
    State(store): State<Arc<dyn NotificationStore>>,
    Query(params): Query<NotificationListParams>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = params
        .user_id
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::BadRequest("userId is required".to_string()))?;

    let notifications = store.list_notifications(&user_id).await?;
    Ok(Json(serde_json::json!({ "notifications": notifications })))
}

pub async fn mark_read(
    State(store): State<Arc<dyn NotificationStore>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let notification = store
        .mark_read(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Notification {} not found", id)))?;

    Ok(Json(serde_json::json!({ "notification": notification })))
}

pub async fn mark_all_read(
    State(store): State<Arc<dyn NotificationStore>>,
    Json(mut payload): Json<MarkAllReadRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.user_id = payload.user_id.trim().to_string();
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let updated = store.mark_all_read(&payload.user_id).await?;
    Ok(Json(serde_json::json!({ "updated": updated })))
}
