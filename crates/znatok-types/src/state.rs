/// Snapshot of the quiz that the assistant is allowed to see.
///
/// Serializes as `{"question": {"currentQuestion": "..."}}`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AssistantState {
    question: QuestionState,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionState {
    current_question: String,
}

impl AssistantState {
    pub fn new(current_question: &str) -> Self {
        Self {
            question: QuestionState {
                current_question: current_question.to_string(),
            },
        }
    }

    pub fn current_question(&self) -> &str {
        &self.question.current_question
    }
}
