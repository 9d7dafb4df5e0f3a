use std::path::PathBuf;

/// Failure of a single dispatch call. The session keeps its previous state.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("Unrecognized action type: {0:?}")]
    UnrecognizedAction(String),
}

/// Errors raised while loading the question bank.
#[derive(Debug, thiserror::Error)]
pub enum BankError {
    #[error("Failed to read question bank {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid question bank JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Question #{index} has no questionAnswer field")]
    MissingAnswer { index: usize },
    #[error("Question #{index} has no non-empty answer alternative")]
    EmptyAnswer { index: usize },
    #[error("Question bank contains no questions")]
    Empty,
}
