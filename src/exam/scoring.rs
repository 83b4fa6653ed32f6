// src/exam/scoring.rs

use std::collections::HashMap;

use crate::{
    ai::TextGenerator,
    exam::fallback::FALLBACK_SUGGESTION,
    models::{exam::ExamProfile, exam_record::Answer, question::Question},
};

/// Outcome of grading one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grade {
    pub correct: usize,
    pub total: usize,
    /// Percentage, 0..=100.
    pub score: u32,
    pub passed: bool,
}

/// Returns `round(100 * correct / total)`, or 0 when `total` is 0.
pub fn calculate_score(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total);
    ((correct as f64 / total as f64) * 100.0).round() as u32
}

/// Grades a submission.
///
/// With an answer key, each served question counts once and is correct when the first answer
/// for it selects the stored `correct_index`; unanswered questions count as wrong. Without a
/// key, the client-reported `is_correct` flags are counted over the submitted answers.
pub fn grade(answers: &[Answer], key: Option<&[Question]>, passing_score: u32) -> Grade {
    let (correct, total) = match key {
        Some(questions) => {
            let mut selected: HashMap<u32, usize> = HashMap::new();
            for answer in answers {
                selected
                    .entry(answer.question_id)
                    .or_insert(answer.selected_index);
            }
            let correct = questions
                .iter()
                .filter(|q| selected.get(&q.id) == Some(&q.correct_index))
                .count();
            (correct, questions.len())
        }
        None => {
            let correct = answers
                .iter()
                .filter(|a| a.is_correct == Some(true))
                .count();
            (correct, answers.len())
        }
    };

    let score = calculate_score(correct, total);
    Grade {
        correct,
        total,
        score,
        passed: score >= passing_score,
    }
}

pub fn suggestion_prompt(profile: &ExamProfile, grade: &Grade) -> String {
    format!(
        "A student just finished a {difficulty} {subject} exam and scored {score}% \
         ({correct} of {total} correct). In 2-3 short sentences, suggest how they can improve. \
         Be encouraging and specific to the subject. Reply with plain text only.",
        difficulty = profile.difficulty.as_str(),
        subject = profile.subject,
        score = grade.score,
        correct = grade.correct,
        total = grade.total,
    )
}

/// Asks the provider for a short improvement suggestion; static sentence on failure.
pub async fn improvement_suggestions(
    generator: &dyn TextGenerator,
    profile: &ExamProfile,
    grade: &Grade,
) -> String {
    match generator.generate(&suggestion_prompt(profile, grade)).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            tracing::warn!("Suggestion generation returned empty text, using fallback");
            FALLBACK_SUGGESTION.to_string()
        }
        Err(e) => {
            tracing::warn!("Suggestion generation failed, using fallback: {}", e);
            FALLBACK_SUGGESTION.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ProviderError;
    use crate::config::PASSING_SCORE_PERCENTAGE;
    use crate::exam::fallback::fallback_questions;
    use crate::exam::identifier::parse_exam_id;
    use async_trait::async_trait;

    fn answer(question_id: u32, selected_index: usize, is_correct: Option<bool>) -> Answer {
        Answer {
            question_id,
            selected_index,
            is_correct,
        }
    }

    #[test]
    fn test_calculate_score_zero_total() {
        assert_eq!(calculate_score(0, 0), 0);
        assert_eq!(calculate_score(3, 0), 0);
    }

    #[test]
    fn test_calculate_score_rounds() {
        assert_eq!(calculate_score(1, 3), 33);
        assert_eq!(calculate_score(2, 3), 67);
        assert_eq!(calculate_score(6, 10), 60);
        assert_eq!(calculate_score(15, 15), 100);
    }

    #[test]
    fn test_grade_with_key_all_correct() {
        let key = fallback_questions(10);
        let answers: Vec<Answer> = key
            .iter()
            .map(|q| answer(q.id, q.correct_index, None))
            .collect();
        let grade = grade(&answers, Some(key.as_slice()), PASSING_SCORE_PERCENTAGE);
        assert_eq!(grade.score, 100);
        assert_eq!(grade.correct, 10);
        assert!(grade.passed);
    }

    #[test]
    fn test_grade_with_key_ignores_client_flags() {
        let key = fallback_questions(2);
        let answers = vec![
            answer(1, (key[0].correct_index + 1) % 4, Some(true)),
            answer(2, (key[1].correct_index + 1) % 4, Some(true)),
        ];
        let grade = grade(&answers, Some(key.as_slice()), PASSING_SCORE_PERCENTAGE);
        assert_eq!(grade.correct, 0);
        assert_eq!(grade.score, 0);
    }

    #[test]
    fn test_grade_with_key_counts_unanswered_and_first_answer_only() {
        let key = fallback_questions(4);
        let answers = vec![
            answer(1, key[0].correct_index, None),
            answer(1, (key[0].correct_index + 1) % 4, None),
            answer(2, (key[1].correct_index + 1) % 4, None),
            answer(2, key[1].correct_index, None),
        ];
        let grade = grade(&answers, Some(key.as_slice()), PASSING_SCORE_PERCENTAGE);
        assert_eq!(grade.correct, 1);
        assert_eq!(grade.total, 4);
        assert_eq!(grade.score, 25);
    }

    #[test]
    fn test_grade_without_key_six_of_ten_passes() {
        let answers: Vec<Answer> = (1..=10)
            .map(|i| answer(i, 0, Some(i <= 6)))
            .collect();
        let grade = grade(&answers, None, PASSING_SCORE_PERCENTAGE);
        assert_eq!(grade.score, 60);
        assert_eq!(grade.correct, 6);
        assert!(grade.passed);
    }

    #[test]
    fn test_grade_without_key_below_threshold_fails() {
        let answers: Vec<Answer> = (1..=10)
            .map(|i| answer(i, 0, Some(i <= 5)))
            .collect();
        let grade = grade(&answers, None, PASSING_SCORE_PERCENTAGE);
        assert_eq!(grade.score, 50);
        assert!(!grade.passed);
    }

    #[test]
    fn test_grade_empty_submission() {
        let grade = grade(&[], None, PASSING_SCORE_PERCENTAGE);
        assert_eq!(grade.score, 0);
        assert_eq!(grade.total, 0);
        assert!(!grade.passed);
    }

    struct Failing;

    #[async_trait]
    impl TextGenerator for Failing {
        async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
            Err(ProviderError::MissingApiKey)
        }
    }

    struct Echo;

    #[async_trait]
    impl TextGenerator for Echo {
        async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
            Ok(format!("  {}  ", prompt))
        }
    }

    #[tokio::test]
    async fn test_suggestions_fall_back_on_error() {
        let profile = parse_exam_id("default-1");
        let grade = grade(&[], None, PASSING_SCORE_PERCENTAGE);
        let text = improvement_suggestions(&Failing, &profile, &grade).await;
        assert_eq!(text, FALLBACK_SUGGESTION);
    }

    #[tokio::test]
    async fn test_suggestion_prompt_embeds_score() {
        let profile = parse_exam_id("dynamic_exam_u1_python_0");
        let answers: Vec<Answer> = (1..=10).map(|i| answer(i, 0, Some(i <= 6))).collect();
        let grade = grade(&answers, None, PASSING_SCORE_PERCENTAGE);
        let text = improvement_suggestions(&Echo, &profile, &grade).await;
        assert!(text.contains("60%"));
        assert!(text.contains("python"));
        assert!(!text.starts_with(' '));
    }
}
