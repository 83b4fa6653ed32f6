// src/models/exam.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::config::PASSING_SCORE_PERCENTAGE;
use crate::models::question::{ContentSource, PublicQuestion};

/// Exam difficulty levels, indexed by the trailing number of a dynamic exam id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
}

impl Difficulty {
    pub const ALL: [Difficulty; 2] = [Difficulty::Easy, Difficulty::Medium];

    /// Looks up a difficulty by index. Out-of-range indices fall back to `Easy`.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(Difficulty::Easy)
    }

    pub fn index(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
        }
    }

    pub fn question_count(self) -> usize {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 15,
        }
    }

    pub fn duration_minutes(self) -> u32 {
        match self {
            Difficulty::Easy => 15,
            Difficulty::Medium => 25,
        }
    }
}

/// Structured description of an exam, recovered from its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamProfile {
    pub exam_id: String,
    /// Owner encoded in a dynamic exam id. Static exams have none.
    pub user_id: Option<String>,
    pub subject: String,
    pub difficulty: Difficulty,
    pub total_questions: usize,
    pub duration_minutes: u32,
    pub passing_score: u32,
}

impl ExamProfile {
    pub fn new(exam_id: &str, user_id: Option<String>, subject: &str, difficulty: Difficulty) -> Self {
        Self {
            exam_id: exam_id.to_string(),
            user_id,
            subject: subject.to_string(),
            difficulty,
            total_questions: difficulty.question_count(),
            duration_minutes: difficulty.duration_minutes(),
            passing_score: PASSING_SCORE_PERCENTAGE,
        }
    }
}

/// One entry of the exam listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSummary {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub difficulty: Difficulty,
    pub total_questions: usize,
    pub duration_minutes: u32,
    pub passing_score: u32,
}

/// Query parameters for `GET /api/exams`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamListParams {
    pub user_id: Option<String>,
    /// Comma-separated interests.
    pub interests: Option<String>,
}

/// DTO for starting an exam.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StartExamRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "examId is required"))]
    pub exam_id: String,
}

/// DTO returned when an exam session is opened.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartExamResponse {
    pub session_id: Uuid,
    pub exam_id: String,
    pub questions: Vec<PublicQuestion>,
    pub source: ContentSource,
    pub profile: ExamProfile,
}
