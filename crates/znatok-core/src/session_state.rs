#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    AwaitingAnswer,
    Answered,
}

/// The in-progress attempt at one question.
///
/// Only `ActionDispatcher` mutates it; everyone else gets a shared reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) current_question_index: usize,
    pub(crate) answer_draft: String,
    pub(crate) feedback: String,
    pub(crate) has_answered: bool,
    pub(crate) attempt_count: u32, // reserved for multi-attempt scoring
}

impl SessionState {
    /// A fresh attempt at the question at `current_question_index`.
    pub fn new(current_question_index: usize) -> Self {
        Self {
            current_question_index,
            answer_draft: String::new(),
            feedback: String::new(),
            has_answered: false,
            attempt_count: 0,
        }
    }

    pub fn state(&self) -> QuizState {
        if self.has_answered {
            QuizState::Answered
        } else {
            QuizState::AwaitingAnswer
        }
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn answer_draft(&self) -> &str {
        &self.answer_draft
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn has_answered(&self) -> bool {
        self.has_answered
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_awaits_answer() {
        let session = SessionState::new(3);
        assert_eq!(session.state(), QuizState::AwaitingAnswer);
        assert_eq!(session.current_question_index(), 3);
        assert_eq!(session.answer_draft(), "");
        assert_eq!(session.feedback(), "");
        assert_eq!(session.attempt_count(), 0);
    }
}
