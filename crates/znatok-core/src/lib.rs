pub mod action;
pub mod bank;
pub mod dialogue_api;
pub mod dispatcher;
pub mod error;
pub mod matcher;
pub mod selector;
pub mod session_state;

pub use action::Action;
pub use bank::{Question, QuestionBank};
pub use dispatcher::ActionDispatcher;
pub use error::{BankError, QuizError};
pub use session_state::{QuizState, SessionState};

use znatok_types::AssistantState;

/// Side effects the dispatcher asks the runtime to carry out.
///
/// The dispatcher only decides; delivering these to the dialogue channel (and
/// waiting for its acknowledgment) is the runtime's job.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Read the verdict of a judged answer aloud.
    SpeakVerdict(String),
    /// Read the current question aloud.
    SpeakQuestion(String),
    /// The question changed; tell the assistant what is on screen now.
    PublishState(AssistantState),
}
