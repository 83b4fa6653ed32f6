// src/exam/fallback.rs

use crate::models::question::Question;

/// Suggestion returned when the provider cannot produce one.
pub const FALLBACK_SUGGESTION: &str = "Review the topics you found difficult, practice with a few more exams at this level, and focus on understanding why each correct answer is right.";

/// Chat reply returned when the provider cannot produce one.
pub const FALLBACK_CHAT_REPLY: &str = "I'm having trouble answering right now. Please try again in a moment, or explore the exams and resources on your dashboard in the meantime.";

/// (text, choices, correct index)
const BANK: [(&str, [&str; 4], usize); 8] = [
    (
        "Which of these is most useful when choosing a career path?",
        [
            "Following whatever is most popular",
            "Matching your interests and strengths to a field",
            "Picking the first job offer",
            "Avoiding any research",
        ],
        1,
    ),
    (
        "What does a resume primarily communicate to an employer?",
        [
            "Your hobbies only",
            "Your salary expectations",
            "Your skills, experience and education",
            "Your personal opinions",
        ],
        2,
    ),
    (
        "Which skill is valued in almost every profession?",
        ["Communication", "Calligraphy", "Juggling", "Speed reading"],
        0,
    ),
    (
        "What is an internship best described as?",
        [
            "A permanent senior position",
            "A short-term role for gaining practical experience",
            "A university entrance exam",
            "A type of retirement plan",
        ],
        1,
    ),
    (
        "Which of these is a SMART goal?",
        [
            "Get better at coding",
            "Be successful someday",
            "Finish an online SQL course within 6 weeks",
            "Learn everything about computers",
        ],
        2,
    ),
    (
        "What is networking in a career context?",
        [
            "Configuring office routers",
            "Building professional relationships",
            "Working only online",
            "Changing jobs every month",
        ],
        1,
    ),
    (
        "Which activity helps most when preparing for an interview?",
        [
            "Researching the company and role",
            "Arriving without any preparation",
            "Memorising unrelated facts",
            "Avoiding questions about yourself",
        ],
        0,
    ),
    (
        "What does continuous learning mean for a professional?",
        [
            "Stopping education after graduation",
            "Only learning when forced to",
            "Repeating the same course",
            "Regularly updating skills as the field evolves",
        ],
        3,
    ),
];

/// Returns exactly `count` questions by cycling through the static bank.
/// Ids run from 1 to `count`.
pub fn fallback_questions(count: usize) -> Vec<Question> {
    BANK.iter()
        .cycle()
        .take(count)
        .enumerate()
        .map(|(i, (text, choices, correct_index))| Question {
            id: (i + 1) as u32,
            text: text.to_string(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            correct_index: *correct_index,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::CHOICES_PER_QUESTION;

    #[test]
    fn test_fallback_cycles_to_requested_count() {
        for count in [0, 1, 8, 10, 15, 23] {
            let questions = fallback_questions(count);
            assert_eq!(questions.len(), count);
        }

        let questions = fallback_questions(10);
        assert_eq!(questions[8].text, questions[0].text);
        assert_eq!(questions[9].id, 10);
    }

    #[test]
    fn test_bank_is_well_formed() {
        for q in fallback_questions(BANK.len()) {
            assert_eq!(q.choices.len(), CHOICES_PER_QUESTION);
            assert!(q.correct_index < CHOICES_PER_QUESTION);
        }
    }
}
