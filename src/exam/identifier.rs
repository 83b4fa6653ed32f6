// src/exam/identifier.rs

use crate::models::exam::{Difficulty, ExamProfile};

const DYNAMIC_PREFIXES: [&str; 2] = ["dynamic_exam", "dynamic-exam"];

/// Subject used for the static exams and for any identifier that cannot be parsed.
pub const GENERAL_SUBJECT: &str = "general";

/// Static exams offered to every user.
pub const STATIC_EXAMS: [(&str, Difficulty); 2] =
    [("default-1", Difficulty::Easy), ("default-2", Difficulty::Medium)];

/// Builds the canonical identifier of a dynamic exam.
pub fn build_exam_id(user_id: &str, subject: &str, difficulty: Difficulty) -> String {
    format!("dynamic_exam_{}_{}_{}", user_id, subject, difficulty.index())
}

/// Recovers the exam profile encoded in an exam identifier.
///
/// Dynamic ids look like `dynamic_exam_{user}_{subject}_{level}`; `-` is accepted in place of
/// `_`. Subjects may themselves contain the delimiter. Anything unrecognised yields the
/// `general`/easy profile.
pub fn parse_exam_id(exam_id: &str) -> ExamProfile {
    let exam_id = exam_id.trim();

    if let Some((_, difficulty)) = STATIC_EXAMS.iter().find(|(id, _)| *id == exam_id) {
        return ExamProfile::new(exam_id, None, GENERAL_SUBJECT, *difficulty);
    }

    match parse_dynamic(exam_id) {
        Some((user_id, subject, difficulty)) => {
            ExamProfile::new(exam_id, Some(user_id), &subject, difficulty)
        }
        None => {
            tracing::debug!("Unrecognised exam id '{}', using general profile", exam_id);
            ExamProfile::new(exam_id, None, GENERAL_SUBJECT, Difficulty::Easy)
        }
    }
}

fn parse_dynamic(exam_id: &str) -> Option<(String, String, Difficulty)> {
    let rest = DYNAMIC_PREFIXES
        .iter()
        .find_map(|prefix| exam_id.strip_prefix(prefix))?;
    let rest = rest.strip_prefix(['_', '-'])?;

    // `_` first so that hyphenated user ids (UUIDs) stay intact.
    let underscored: Vec<&str> = rest.split('_').collect();
    let (tokens, delimiter) = if underscored.len() >= 3 {
        (underscored, "_")
    } else {
        (rest.split('-').collect::<Vec<_>>(), "-")
    };
    if tokens.len() < 3 || tokens.iter().any(|t| t.is_empty()) {
        return None;
    }

    let user_id = tokens[0].to_string();
    let level = tokens[tokens.len() - 1];
    let subject = tokens[1..tokens.len() - 1].join(delimiter).to_lowercase();

    let difficulty = level
        .parse::<usize>()
        .map(Difficulty::from_index)
        .unwrap_or(Difficulty::Easy);

    Some((user_id, subject, difficulty))
}
