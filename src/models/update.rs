// src/models/update.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'updates' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Update {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub category: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for publishing an update.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUpdateRequest {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 200,
        message = "title is required and must be at most 200 chars"
    ))]
    pub title: String,

    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 10000,
        message = "content is required and must be at most 10000 chars"
    ))]
    pub content: String,

    #[validate(length(max = 100))]
    pub author: Option<String>,

    #[validate(length(max = 50))]
    pub category: Option<String>,
}
