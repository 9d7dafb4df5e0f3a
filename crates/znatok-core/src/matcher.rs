//! Judges a free-text answer against a question's accepted answers.
//!
//! Matching is exact after normalization (trim + lowercase). Variant
//! spellings are tolerated only through the question's list of alternatives.

use crate::bank::Question;
use std::collections::HashSet;

pub const CORRECT: &str = "Правильный ответ!";
pub const ANSWER_IS: &str = "Правильный ответ:";
pub const INCORRECT: &str = "Неправильный ответ.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub is_correct: bool,
    /// Feedback for the screen, with highlight markup.
    pub display_feedback: String,
    /// Plain-text feedback for reading aloud.
    pub spoken_feedback: String,
}

pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

pub fn judge(submitted: &str, question: &Question) -> Verdict {
    let submitted = normalize(submitted);
    let accepted: HashSet<String> = question
        .canonical_answers()
        .iter()
        .map(|answer| normalize(answer))
        .collect();
    let primary = question.primary_answer();

    if accepted.contains(&submitted) {
        Verdict {
            is_correct: true,
            display_feedback: with_comment(bold(CORRECT), question.comment()),
            spoken_feedback: CORRECT.to_string(),
        }
    } else if submitted.is_empty() {
        // Nothing was given, so only reveal the answer.
        Verdict {
            is_correct: false,
            display_feedback: with_comment(
                format!("{} {}.", bold(ANSWER_IS), primary),
                question.comment(),
            ),
            spoken_feedback: format!("{ANSWER_IS} {primary}"),
        }
    } else {
        Verdict {
            is_correct: false,
            display_feedback: with_comment(
                format!("{} {} {}.", bold(INCORRECT), bold(ANSWER_IS), primary),
                question.comment(),
            ),
            spoken_feedback: format!("{INCORRECT} {ANSWER_IS} {primary}"),
        }
    }
}

fn bold(text: &str) -> String {
    format!(r#"<span class="bold-feedback">{text}</span>"#)
}

fn with_comment(mut message: String, comment: Option<&str>) -> String {
    if let Some(comment) = comment {
        message.push(' ');
        message.push_str(comment);
    }
    message
}
