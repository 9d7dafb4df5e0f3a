use znatok_types::RawAction;

/// Everything that can be asked of a quiz session, from the keyboard or from
/// the dialogue channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the draft answer.
    EnterAnswer { answer: String },
    /// Judge `answer` if given and non-empty, otherwise the current draft.
    CheckAnswer { answer: Option<String> },
    NextQuestion,
    ReadQuestion,
    /// A tag this build does not know. Dispatching it is an error.
    Unrecognized(String),
}

impl Action {
    pub fn tag(&self) -> &str {
        match self {
            Action::EnterAnswer { .. } => "enter_answer",
            Action::CheckAnswer { .. } => "check_answer",
            Action::NextQuestion => "next_question",
            Action::ReadQuestion => "read_question",
            Action::Unrecognized(tag) => tag,
        }
    }
}

impl From<RawAction> for Action {
    fn from(raw: RawAction) -> Self {
        match raw.action_type.as_str() {
            "enter_answer" => Action::EnterAnswer {
                answer: raw.answer.unwrap_or_default(),
            },
            "check_answer" => Action::CheckAnswer { answer: raw.answer },
            "next_question" => Action::NextQuestion,
            "read_question" => Action::ReadQuestion,
            _ => Action::Unrecognized(raw.action_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags() {
        assert_eq!(
            Action::from(RawAction::new("enter_answer").with_answer("4")),
            Action::EnterAnswer {
                answer: "4".to_string()
            }
        );
        assert_eq!(
            Action::from(RawAction::new("check_answer")),
            Action::CheckAnswer { answer: None }
        );
        assert_eq!(Action::from(RawAction::new("next_question")), Action::NextQuestion);
        assert_eq!(Action::from(RawAction::new("read_question")), Action::ReadQuestion);
    }

    #[test]
    fn test_enter_answer_without_text_clears_draft() {
        assert_eq!(
            Action::from(RawAction::new("enter_answer")),
            Action::EnterAnswer {
                answer: String::new()
            }
        );
    }

    #[test]
    fn test_unknown_tag_is_kept() {
        let action = Action::from(RawAction::new("skip_question"));
        assert_eq!(action, Action::Unrecognized("skip_question".to_string()));
        assert_eq!(action.tag(), "skip_question");
    }
}
