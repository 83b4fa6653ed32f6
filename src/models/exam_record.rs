// src/models/exam_record.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents the 'exam_results' table in the database.
/// Stores the outcome of one exam attempt.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResult {
    pub id: i64,
    pub user_id: String,
    pub exam_id: String,
    pub subject: String,
    pub difficulty: String,
    pub score: i32,
    pub correct: i32,
    pub total: i32,
    pub passed: bool,
    pub time_taken_minutes: f64,
    pub suggestions: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Values for inserting a new exam result.
#[derive(Debug, Clone)]
pub struct NewExamResult {
    pub user_id: String,
    pub exam_id: String,
    pub subject: String,
    pub difficulty: String,
    pub score: i32,
    pub correct: i32,
    pub total: i32,
    pub passed: bool,
    pub time_taken_minutes: f64,
    pub suggestions: String,
}

/// A single submitted answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: u32,
    pub selected_index: usize,
    /// Client-computed correctness. Only trusted when no server-held answer key exists.
    #[serde(default)]
    pub is_correct: Option<bool>,
}

/// DTO for submitting an exam attempt.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitExamRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "examId is required"))]
    pub exam_id: String,

    #[validate(required(message = "answers is required"))]
    pub answers: Option<Vec<Answer>>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "timeTakenMinutes must not be negative"))]
    pub time_taken_minutes: Option<f64>,

    /// The session returned by `/api/start`. Enables server-side grading.
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

/// DTO returned after grading a submission.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitExamResponse {
    pub success: bool,
    pub score: u32,
    pub total: usize,
    pub correct: usize,
    pub passed: bool,
    pub suggestions: String,
    pub result_id: Option<i64>,
}

/// Query parameters for `GET /api/history`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryParams {
    pub user_id: Option<String>,
}
