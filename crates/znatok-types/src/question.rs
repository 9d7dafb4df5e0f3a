/// One entry of the question dataset, exactly as it is stored on disk.
///
/// `question_answer` holds every accepted answer joined by `;`. It is kept
/// optional here so that a missing field can be reported with its position
/// by the loader instead of failing the whole parse.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub question_text: String,
    #[serde(default)]
    pub question_answer: Option<String>,
    #[serde(default)]
    pub question_comment: String,
}

impl QuestionRecord {
    pub fn new(text: &str, answer: &str, comment: &str) -> Self {
        Self {
            question_text: text.to_string(),
            question_answer: Some(answer.to_string()),
            question_comment: comment.to_string(),
        }
    }
}
