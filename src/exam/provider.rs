// src/exam/provider.rs

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    ai::{ProviderError, TextGenerator},
    exam::fallback::fallback_questions,
    models::{
        exam::ExamProfile,
        question::{CHOICES_PER_QUESTION, ContentSource, Question},
    },
};

/// First `[` through last `]`, across lines.
static ARRAY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("array pattern compiles"));

/// Question shape accepted from the model. Field names vary between completions.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(alias = "question")]
    text: String,
    #[serde(alias = "options")]
    choices: Vec<String>,
    #[serde(alias = "correctAnswer", alias = "correct_answer", alias = "correct_index")]
    #[serde(rename = "correctIndex")]
    correct_index: usize,
}

/// Questions for one exam plus where they came from.
#[derive(Debug, Clone)]
pub struct QuestionBatch {
    pub questions: Vec<Question>,
    pub source: ContentSource,
}

/// Produces exam questions from the generative provider, degrading to the static bank.
#[derive(Clone)]
pub struct QuestionProvider {
    generator: Arc<dyn TextGenerator>,
}

impl QuestionProvider {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Never fails. Any provider error is logged and replaced by the fallback bank.
    pub async fn generate(&self, profile: &ExamProfile) -> QuestionBatch {
        match self.try_generate(profile).await {
            Ok(questions) => {
                tracing::info!(
                    "Generated {} {} questions for '{}'",
                    questions.len(),
                    profile.difficulty.as_str(),
                    profile.subject
                );
                QuestionBatch {
                    questions,
                    source: ContentSource::Generated,
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Question generation for '{}' failed, serving fallback bank: {}",
                    profile.subject,
                    e
                );
                QuestionBatch {
                    questions: fallback_questions(profile.total_questions),
                    source: ContentSource::Fallback,
                }
            }
        }
    }

    /// One provider call, no retry.
    pub async fn try_generate(&self, profile: &ExamProfile) -> Result<Vec<Question>, ProviderError> {
        let prompt = question_prompt(profile);
        let completion = self.generator.generate(&prompt).await?;
        parse_questions(&completion, profile.total_questions)
    }
}

pub fn question_prompt(profile: &ExamProfile) -> String {
    format!(
        "Generate {count} multiple-choice questions about {subject} at {difficulty} difficulty \
         for a career-guidance assessment.\n\
         Return ONLY a JSON array, with no commentary, where each item has exactly these fields:\n\
         - \"id\": number starting at 1\n\
         - \"text\": the question\n\
         - \"choices\": array of exactly 4 answer strings\n\
         - \"correctIndex\": index (0-3) of the correct choice\n\
         Vary the position of the correct choice.",
        count = profile.total_questions,
        subject = profile.subject,
        difficulty = profile.difficulty.as_str(),
    )
}

/// Parses a completion into at most `limit` questions.
///
/// The whole text is tried as JSON first. Only when that fails is the first bracketed
/// substring extracted and parsed. Items that do not fit the question shape are skipped,
/// choices beyond four are dropped, and ids are reassigned from 1.
pub fn parse_questions(completion: &str, limit: usize) -> Result<Vec<Question>, ProviderError> {
    let value = match serde_json::from_str::<Value>(completion.trim()) {
        Ok(value) => value,
        Err(direct) => {
            let candidate = ARRAY_PATTERN
                .find(completion)
                .ok_or_else(|| ProviderError::Malformed(direct.to_string()))?;
            serde_json::from_str::<Value>(candidate.as_str())
                .map_err(|e| ProviderError::Malformed(e.to_string()))?
        }
    };

    let Value::Array(items) = value else {
        return Err(ProviderError::NotAnArray);
    };

    let questions: Vec<Question> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RawQuestion>(item) {
            Ok(raw) => Some(raw),
            Err(e) => {
                tracing::debug!("Skipping malformed question item: {}", e);
                None
            }
        })
        .filter_map(|mut raw| {
            raw.choices.truncate(CHOICES_PER_QUESTION);
            (raw.correct_index < raw.choices.len() && !raw.text.trim().is_empty()).then_some(raw)
        })
        .take(limit)
        .enumerate()
        .map(|(i, raw)| Question {
            id: (i + 1) as u32,
            text: raw.text.trim().to_string(),
            choices: raw.choices,
            correct_index: raw.correct_index,
        })
        .collect();

    if questions.is_empty() {
        return Err(ProviderError::NoUsableQuestions);
    }
    Ok(questions)
}
