use crate::{
    Command,
    action::Action,
    bank::{Question, QuestionBank},
    error::QuizError,
    matcher,
    selector::QuestionSelector,
    session_state::SessionState,
};
use std::sync::Arc;
use znatok_types::AssistantState;

/// Drives one quiz session.
///
/// Owns the `SessionState` and is the only thing that changes it. Each call
/// to [`ActionDispatcher::dispatch`] either applies a whole transition or
/// leaves the state untouched.
pub struct ActionDispatcher {
    bank: Arc<QuestionBank>,
    selector: Box<dyn QuestionSelector>,
    session: SessionState,
}

impl ActionDispatcher {
    /// Starts a session on a question chosen by `selector`.
    pub fn new(bank: Arc<QuestionBank>, selector: Box<dyn QuestionSelector>) -> Self {
        let mut dispatcher = Self {
            bank,
            selector,
            session: SessionState::new(0),
        };
        let index = dispatcher.select(None);
        dispatcher.session = SessionState::new(index);
        tracing::debug!("Session started on question #{}", index);
        dispatcher
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn current_question(&self) -> &Question {
        self.bank.question_at(self.session.current_question_index)
    }

    pub fn assistant_state(&self) -> AssistantState {
        AssistantState::new(self.current_question().text())
    }

    /// Applies `action` to the session and returns the side effect it asks for, if any.
    pub fn dispatch(&mut self, action: Action) -> Result<Option<Command>, QuizError> {
        tracing::debug!("Dispatching action: {}", action.tag());
        match action {
            Action::EnterAnswer { answer } => {
                if self.session.has_answered {
                    tracing::debug!("Answer already checked; ignoring draft edit");
                    return Ok(None);
                }
                self.session.answer_draft = answer;
                Ok(None)
            }
            Action::CheckAnswer { answer } => {
                if self.session.has_answered {
                    tracing::debug!("Answer already checked; ignoring repeated submission");
                    return Ok(None);
                }
                let submitted = answer
                    .filter(|answer| !answer.is_empty())
                    .unwrap_or_else(|| self.session.answer_draft.clone());
                let verdict = matcher::judge(&submitted, self.current_question());
                tracing::info!(
                    "Checked answer {:?} for question #{}: correct={}",
                    submitted,
                    self.session.current_question_index,
                    verdict.is_correct
                );

                self.session.feedback = verdict.display_feedback;
                self.session.has_answered = true;
                Ok(Some(Command::SpeakVerdict(verdict.spoken_feedback)))
            }
            Action::NextQuestion => {
                let previous = self.session.current_question_index;
                let index = self.select(Some(previous));
                self.session = SessionState::new(index);
                tracing::info!("Moved from question #{} to #{}", previous, index);
                Ok(Some(Command::PublishState(self.assistant_state())))
            }
            Action::ReadQuestion => Ok(Some(Command::SpeakQuestion(
                self.current_question().text().to_string(),
            ))),
            Action::Unrecognized(tag) => Err(QuizError::UnrecognizedAction(tag)),
        }
    }

    fn select(&mut self, previous: Option<usize>) -> usize {
        let bank_size = self.bank.len();
        let index = self.selector.pick_next(bank_size, previous);
        if index < bank_size {
            index
        } else {
            tracing::warn!(
                "Selector returned index {} for a bank of {}; wrapping around",
                index,
                bank_size
            );
            index % bank_size
        }
    }
}
