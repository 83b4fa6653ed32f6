// src/models/question.rs

use serde::{Deserialize, Serialize};

/// Number of choices every question carries.
pub const CHOICES_PER_QUESTION: usize = 4;

/// A multiple-choice question with its answer key.
///
/// Serialized with exactly `id`, `text`, `choices` and `correctIndex`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub choices: Vec<String>,
    /// Index into `choices`, 0..3.
    pub correct_index: usize,
}

/// DTO for sending a question to the client (excludes the answer key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: u32,
    pub text: String,
    pub choices: Vec<String>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            text: q.text.clone(),
            choices: q.choices.clone(),
        }
    }
}

/// Whether content came from the generative provider or a static fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Generated,
    Fallback,
}
