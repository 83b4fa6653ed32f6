// src/exam/catalog.rs

use crate::{
    exam::identifier::{GENERAL_SUBJECT, STATIC_EXAMS, build_exam_id, parse_exam_id},
    models::exam::{Difficulty, ExamProfile, ExamSummary},
};

/// Splits a comma-separated interest list. Trims, drops blanks and duplicates, keeps order.
pub fn parse_interests(raw: Option<&str>) -> Vec<String> {
    let mut interests: Vec<String> = Vec::new();
    for interest in raw.unwrap_or_default().split(',') {
        let interest = interest.trim();
        if interest.is_empty() || interests.iter().any(|i| i.eq_ignore_ascii_case(interest)) {
            continue;
        }
        interests.push(interest.to_string());
    }
    interests
}

/// Turns an interest into the subject slug embedded in exam ids.
pub fn slugify(interest: &str) -> String {
    interest
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Lists the exams offered to a user: the static exams, then one exam per difficulty for each
/// interest.
pub fn list_exams(user_id: &str, interests: &[String]) -> Vec<ExamSummary> {
    let mut exams: Vec<ExamSummary> = STATIC_EXAMS
        .iter()
        .enumerate()
        .map(|(i, (id, _))| summary(parse_exam_id(id), format!("General Aptitude {}", i + 1)))
        .collect();

    let mut seen: Vec<String> = Vec::new();
    for interest in interests {
        let slug = slugify(interest);
        if slug.is_empty() || slug == GENERAL_SUBJECT || seen.contains(&slug) {
            continue;
        }
        for difficulty in Difficulty::ALL {
            let id = build_exam_id(user_id, &slug, difficulty);
            let profile = ExamProfile::new(&id, Some(user_id.to_string()), &slug, difficulty);
            let title = format!("{} ({})", interest.trim(), capitalize(difficulty.as_str()));
            exams.push(summary(profile, title));
        }
        seen.push(slug);
    }

    exams
}

fn summary(profile: ExamProfile, title: String) -> ExamSummary {
    ExamSummary {
        id: profile.exam_id,
        title,
        subject: profile.subject,
        difficulty: profile.difficulty,
        total_questions: profile.total_questions,
        duration_minutes: profile.duration_minutes,
        passing_score: profile.passing_score,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
