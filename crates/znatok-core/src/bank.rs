use crate::error::BankError;
use std::fs;
use std::path::Path;
use znatok_types::QuestionRecord;

/// Separator between accepted answers in the dataset's `questionAnswer` field.
pub const ANSWER_SEPARATOR: char = ';';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    canonical_answers: Vec<String>,
    comment: String,
}

impl Question {
    /// Builds a question from the raw dataset fields.
    ///
    /// Returns `None` when `raw_answers` holds no non-empty alternative.
    pub fn parse(text: &str, raw_answers: &str, comment: &str) -> Option<Self> {
        let canonical_answers = split_answers(raw_answers);
        if canonical_answers.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            canonical_answers,
            comment: comment.trim().to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn canonical_answers(&self) -> &[String] {
        &self.canonical_answers
    }

    /// The answer shown to the user when they get it wrong.
    pub fn primary_answer(&self) -> &str {
        // `parse` guarantees at least one alternative.
        &self.canonical_answers[0]
    }

    pub fn comment(&self) -> Option<&str> {
        if self.comment.is_empty() {
            None
        } else {
            Some(&self.comment)
        }
    }
}

/// Splits a `;`-joined answer field into trimmed, non-empty alternatives.
pub fn split_answers(raw: &str) -> Vec<String> {
    raw.split(ANSWER_SEPARATOR)
        .map(str::trim)
        .filter(|answer| !answer.is_empty())
        .map(str::to_string)
        .collect()
}

/// Immutable, non-empty, ordered set of questions.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn from_records(records: Vec<QuestionRecord>) -> Result<Self, BankError> {
        let questions = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let raw_answers = record
                    .question_answer
                    .ok_or(BankError::MissingAnswer { index })?;
                Question::parse(&record.question_text, &raw_answers, &record.question_comment)
                    .ok_or(BankError::EmptyAnswer { index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if questions.is_empty() {
            return Err(BankError::Empty);
        }
        Ok(Self { questions })
    }

    pub fn from_json_str(json: &str) -> Result<Self, BankError> {
        let records: Vec<QuestionRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    pub fn from_path(path: &Path) -> Result<Self, BankError> {
        let json = fs::read_to_string(path).map_err(|source| BankError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// The question at `index`, wrapping around past the end.
    pub fn question_at(&self, index: usize) -> &Question {
        // Construction rejects empty banks, so the modulus is never zero.
        &self.questions[index % self.questions.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_split_answers_trims_and_keeps_order() {
        assert_eq!(
            split_answers(" Пушкин ; А. С. Пушкин;;  "),
            vec!["Пушкин".to_string(), "А. С. Пушкин".to_string()]
        );
        assert_eq!(split_answers("four"), vec!["four".to_string()]);
    }

    #[test]
    fn test_question_primary_answer_and_comment() {
        let question = Question::parse("2+2?", "four;4", "basic arithmetic").unwrap();
        assert_eq!(question.primary_answer(), "four");
        assert_eq!(question.canonical_answers().len(), 2);
        assert_eq!(question.comment(), Some("basic arithmetic"));

        let bare = Question::parse("2+2?", "4", "  ").unwrap();
        assert_eq!(bare.comment(), None);
    }

    #[test]
    fn test_question_without_alternatives_is_rejected() {
        assert!(Question::parse("?", " ; ", "").is_none());
    }

    #[test]
    fn test_bank_from_json() {
        let bank = QuestionBank::from_json_str(
            r#"[
                {"questionText": "2+2?", "questionAnswer": "four;4", "questionComment": ""},
                {"questionText": "Столица Франции?", "questionAnswer": "Париж"}
            ]"#,
        )
        .unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.get(1).unwrap().primary_answer(), "Париж");
        assert!(bank.get(2).is_none());
        assert_eq!(bank.question_at(2).text(), "2+2?");
        assert_eq!(bank.question_at(3).text(), "Столица Франции?");
    }

    #[test]
    fn test_bank_rejects_missing_answer() {
        let result = QuestionBank::from_json_str(
            r#"[
                {"questionText": "ok", "questionAnswer": "yes"},
                {"questionText": "broken"}
            ]"#,
        );
        assert!(matches!(result, Err(BankError::MissingAnswer { index: 1 })));
    }

    #[test]
    fn test_bank_rejects_blank_answer() {
        let result =
            QuestionBank::from_json_str(r#"[{"questionText": "x", "questionAnswer": " ; "}]"#);
        assert!(matches!(result, Err(BankError::EmptyAnswer { index: 0 })));
    }

    #[test]
    fn test_bank_rejects_empty_dataset() {
        assert!(matches!(
            QuestionBank::from_json_str("[]"),
            Err(BankError::Empty)
        ));
    }

    #[test]
    fn test_bank_from_path() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("questions.json");
        let mut file = fs::File::create(&path)?;
        writeln!(
            file,
            r#"[{{"questionText": "2+2?", "questionAnswer": "4", "questionComment": "easy"}}]"#
        )?;

        let bank = QuestionBank::from_path(&path)?;
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.iter().next().unwrap().text(), "2+2?");
        Ok(())
    }

    #[test]
    fn test_bank_from_missing_path() {
        let result = QuestionBank::from_path(Path::new("no_such_questions_file.json"));
        assert!(matches!(result, Err(BankError::Io { .. })));
    }
}
