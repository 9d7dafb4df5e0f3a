//! Session loop and command handler.
//!
//! The session task owns the `ActionDispatcher` and handles one `Input` at a
//! time. Whatever the dispatcher asks for goes out as a `Command` to the
//! command handler, which is the only place that waits on the dialogue channel.

use crate::console::{self, ConsoleCommand};
use anyhow::{Context, Result};
use std::io::Write;
use tokio::sync::mpsc;
use znatok_core::dialogue_api::DialogueChannel;
use znatok_core::{Action, ActionDispatcher, Command};
use znatok_types::{InboundEvent, LifecycleEvent, ReadActionId};

pub enum Input {
    /// Something the dialogue channel pushed to us.
    Bridge(InboundEvent),
    /// A line typed at the console.
    Local(ConsoleCommand),
}

pub struct Session<W: Write> {
    dispatcher: ActionDispatcher,
    command_tx: mpsc::Sender<Command>,
    screen: W,
}

impl<W: Write> Session<W> {
    pub fn new(dispatcher: ActionDispatcher, command_tx: mpsc::Sender<Command>, screen: W) -> Self {
        Self {
            dispatcher,
            command_tx,
            screen,
        }
    }

    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    pub fn into_screen(self) -> W {
        self.screen
    }

    /// Prints the current question and feedback.
    pub fn show(&mut self) -> Result<()> {
        writeln!(self.screen, "{}", console::render(&self.dispatcher))
            .context("Failed to write to the console")
    }

    pub async fn handle_input(&mut self, input: Input) -> Result<()> {
        match input {
            Input::Bridge(event) => self.handle_event(event).await,
            Input::Local(ConsoleCommand::Answer(text)) => {
                self.apply(Action::EnterAnswer { answer: text }).await?;
                self.apply(Action::CheckAnswer { answer: None }).await
            }
            Input::Local(ConsoleCommand::Next) => self.apply(Action::NextQuestion).await,
            Input::Local(ConsoleCommand::Read) => self.apply(Action::ReadQuestion).await,
            Input::Local(ConsoleCommand::Quit) => Ok(()),
        }
    }

    async fn handle_event(&mut self, event: InboundEvent) -> Result<()> {
        match event {
            InboundEvent::Lifecycle(LifecycleEvent::Start) => {
                tracing::info!("Dialogue session started; publishing current question.");
                let state = self.dispatcher.assistant_state();
                self.send(Command::PublishState(state)).await
            }
            InboundEvent::Lifecycle(LifecycleEvent::Error(payload)) => {
                tracing::warn!("Dialogue channel reported an error: {}", payload);
                Ok(())
            }
            InboundEvent::Lifecycle(other) => {
                tracing::debug!("Lifecycle event: {:?}", other);
                Ok(())
            }
            InboundEvent::Character { id } => {
                tracing::info!("Assistant character: {}", id.as_deref().unwrap_or("unknown"));
                Ok(())
            }
            InboundEvent::Insets => {
                tracing::debug!("Insets changed.");
                Ok(())
            }
            InboundEvent::Ack(_) => {
                tracing::debug!("Stray ack reached the session; ignoring.");
                Ok(())
            }
            InboundEvent::Data {
                event_type,
                action: None,
            } => {
                tracing::debug!("Data event {:?} carries no action; ignoring.", event_type);
                Ok(())
            }
            InboundEvent::Data {
                event_type,
                action: Some(action),
            } => {
                tracing::debug!("Data event {:?} with action {:?}", event_type, action);
                self.apply(Action::from(action)).await
            }
        }
    }

    async fn apply(&mut self, action: Action) -> Result<()> {
        let before = self.dispatcher.session().clone();
        let command = self.dispatcher.dispatch(action)?;
        if self.dispatcher.session() != &before {
            self.show()?;
        }
        match command {
            Some(command) => self.send(command).await,
            None => Ok(()),
        }
    }

    // Takes `&mut self` so the future only needs `Session: Send`.
    async fn send(&mut self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .context("Command handler is gone")
    }
}

/// Processes inputs until every input sender is dropped.
pub async fn run_session<W: Write>(mut session: Session<W>, mut input_rx: mpsc::Receiver<Input>) {
    while let Some(input) = input_rx.recv().await {
        if let Err(e) = session.handle_input(input).await {
            // A bad input never ends the session.
            tracing::error!("Error in session handler: {:?}", e);
        }
    }
    tracing::info!("Session input closed.");
}

/// Carries out one command against the dialogue channel.
pub async fn execute<C: DialogueChannel + ?Sized>(channel: &mut C, command: Command) -> Result<()> {
    match command {
        Command::SpeakVerdict(text) => {
            tracing::info!("COMMAND RECEIVED: Speak verdict: '{}'", text);
            channel.read_aloud(ReadActionId::Read, text).await
        }
        Command::SpeakQuestion(text) => {
            tracing::info!("COMMAND RECEIVED: Speak question: '{}'", text);
            channel.read_aloud(ReadActionId::ReadQuestion, text).await
        }
        Command::PublishState(state) => {
            tracing::info!(
                "COMMAND RECEIVED: Publish state: '{}'",
                state.current_question()
            );
            channel.publish_state(state).await
        }
    }
}

/// Delivers commands in order; a failed delivery is logged and skipped.
pub async fn run_command_handler<C: DialogueChannel>(
    mut channel: C,
    mut command_rx: mpsc::Receiver<Command>,
) {
    while let Some(command) = command_rx.recv().await {
        if let Err(e) = execute(&mut channel, command).await {
            tracing::error!("Failed to deliver command: {:?}", e);
        }
    }
}

/// Stands in for the command handler when there is no dialogue channel.
pub async fn run_offline_handler(mut command_rx: mpsc::Receiver<Command>) {
    while let Some(command) = command_rx.recv().await {
        tracing::debug!("Offline, dropping command: {:?}", command);
    }
}

/// Feeds dialogue channel events into the session task.
pub async fn forward_events(mut events: mpsc::Receiver<InboundEvent>, input_tx: mpsc::Sender<Input>) {
    while let Some(event) = events.recv().await {
        if input_tx.send(Input::Bridge(event)).await.is_err() {
            break;
        }
    }
    tracing::info!("Dialogue channel events ended.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::{mock, predicate::*};
    use std::collections::VecDeque;
    use std::sync::Arc;
    use znatok_core::selector::QuestionSelector;
    use znatok_core::{QuestionBank, QuizState, matcher};
    use znatok_types::AssistantState;

    mock! {
        pub Channel {}
        #[async_trait]
        impl DialogueChannel for Channel {
            async fn read_aloud(&mut self, action_id: ReadActionId, text: String) -> Result<()>;
            async fn publish_state(&mut self, state: AssistantState) -> Result<()>;
            async fn inbound_events(&mut self) -> Result<mpsc::Receiver<InboundEvent>>;
        }
    }

    struct ScriptedSelector {
        picks: VecDeque<usize>,
    }

    impl QuestionSelector for ScriptedSelector {
        fn pick_next(&mut self, _bank_size: usize, _previous: Option<usize>) -> usize {
            self.picks.pop_front().unwrap_or(0)
        }
    }

    fn session(picks: &[usize]) -> (Session<Vec<u8>>, mpsc::Receiver<Command>) {
        let bank = QuestionBank::from_json_str(
            r#"[
                {"questionText":"2+2?","questionAnswer":"four;4","questionComment":"basic arithmetic"},
                {"questionText":"Столица Франции?","questionAnswer":"Париж"}
            ]"#,
        )
        .unwrap();
        let dispatcher = ActionDispatcher::new(
            Arc::new(bank),
            Box::new(ScriptedSelector {
                picks: picks.iter().copied().collect(),
            }),
        );
        let (command_tx, command_rx) = mpsc::channel(8);
        (Session::new(dispatcher, command_tx, Vec::new()), command_rx)
    }

    fn event(json: &str) -> Input {
        Input::Bridge(InboundEvent::from_json(json).unwrap())
    }

    #[tokio::test]
    async fn test_start_publishes_current_question() {
        let (mut session, mut command_rx) = session(&[1]);
        session.handle_input(event(r#"{"type":"start"}"#)).await.unwrap();

        assert_eq!(
            command_rx.try_recv().unwrap(),
            Command::PublishState(AssistantState::new("Столица Франции?"))
        );
    }

    #[tokio::test]
    async fn test_data_event_checks_answer_and_speaks_verdict() {
        let (mut session, mut command_rx) = session(&[0]);
        session
            .handle_input(event(
                r#"{"type":"smart_app_data","action":{"type":"check_answer","answer":"4"}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(
            command_rx.try_recv().unwrap(),
            Command::SpeakVerdict(matcher::CORRECT.to_string())
        );
        assert_eq!(session.dispatcher().session().state(), QuizState::Answered);
        let screen = String::from_utf8(session.into_screen()).unwrap();
        assert!(screen.contains("Правильный ответ!"));
        assert!(!screen.contains("<span"));
    }

    #[tokio::test]
    async fn test_control_events_and_actionless_data_are_not_dispatched() {
        let (mut session, mut command_rx) = session(&[0]);
        for json in [
            r#"{"type":"character","character":{"id":"sber"}}"#,
            r#"{"type":"insets"}"#,
            r#"{"type":"tts","state":"start"}"#,
            r#"{"type":"smart_app_data"}"#,
        ] {
            session.handle_input(event(json)).await.unwrap();
        }

        assert!(command_rx.try_recv().is_err());
        assert_eq!(session.dispatcher().session().state(), QuizState::AwaitingAnswer);
    }

    #[tokio::test]
    async fn test_unknown_action_is_an_error_and_leaves_state_alone() {
        let (mut session, mut command_rx) = session(&[0]);
        let before = session.dispatcher().session().clone();
        let result = session
            .handle_input(event(
                r#"{"type":"smart_app_data","action":{"type":"skip_round"}}"#,
            ))
            .await;

        assert!(result.is_err());
        assert_eq!(session.dispatcher().session(), &before);
        assert!(command_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_typed_line_enters_and_submits() {
        let (mut session, mut command_rx) = session(&[0]);
        session
            .handle_input(Input::Local(ConsoleCommand::Answer("five".to_string())))
            .await
            .unwrap();

        assert_eq!(session.dispatcher().session().answer_draft(), "five");
        match command_rx.try_recv().unwrap() {
            Command::SpeakVerdict(text) => assert!(text.contains("four")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_next_question_publishes_new_state() {
        let (mut session, mut command_rx) = session(&[0, 1]);
        session
            .handle_input(Input::Local(ConsoleCommand::Next))
            .await
            .unwrap();

        assert_eq!(
            command_rx.try_recv().unwrap(),
            Command::PublishState(AssistantState::new("Столица Франции?"))
        );
    }

    #[tokio::test]
    async fn test_spawned_session_processes_inputs_in_order() {
        let (session, mut command_rx) = session(&[0, 1]);
        let (input_tx, input_rx) = mpsc::channel(8);
        let handle = tokio::spawn(run_session(session, input_rx));

        input_tx.send(event(r#"{"type":"start"}"#)).await.unwrap();
        input_tx
            .send(event(
                r#"{"type":"smart_app_data","action":{"type":"check_answer","answer":"four"}}"#,
            ))
            .await
            .unwrap();
        input_tx
            .send(Input::Local(ConsoleCommand::Next))
            .await
            .unwrap();
        drop(input_tx);
        handle.await.unwrap();

        assert_eq!(
            command_rx.recv().await,
            Some(Command::PublishState(AssistantState::new("2+2?")))
        );
        assert_eq!(
            command_rx.recv().await,
            Some(Command::SpeakVerdict(matcher::CORRECT.to_string()))
        );
        assert_eq!(
            command_rx.recv().await,
            Some(Command::PublishState(AssistantState::new("Столица Франции?")))
        );
        assert_eq!(command_rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_execute_maps_commands_to_channel_calls() {
        let mut channel = MockChannel::new();
        channel
            .expect_read_aloud()
            .with(eq(ReadActionId::Read), eq("Правильный ответ!".to_string()))
            .times(1)
            .returning(|_, _| Ok(()));
        channel
            .expect_read_aloud()
            .with(eq(ReadActionId::ReadQuestion), eq("2+2?".to_string()))
            .times(1)
            .returning(|_, _| Ok(()));
        channel
            .expect_publish_state()
            .with(eq(AssistantState::new("2+2?")))
            .times(1)
            .returning(|_| Ok(()));

        execute(&mut channel, Command::SpeakVerdict("Правильный ответ!".to_string()))
            .await
            .unwrap();
        execute(&mut channel, Command::SpeakQuestion("2+2?".to_string()))
            .await
            .unwrap();
        execute(&mut channel, Command::PublishState(AssistantState::new("2+2?")))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_command_handler_keeps_going_after_a_failure() {
        let mut channel = MockChannel::new();
        channel
            .expect_read_aloud()
            .times(2)
            .returning(|_, text| {
                if text == "first" {
                    Err(anyhow::anyhow!("no acknowledgment"))
                } else {
                    Ok(())
                }
            });

        let (command_tx, command_rx) = mpsc::channel(4);
        command_tx
            .send(Command::SpeakVerdict("first".to_string()))
            .await
            .unwrap();
        command_tx
            .send(Command::SpeakVerdict("second".to_string()))
            .await
            .unwrap();
        drop(command_tx);

        run_command_handler(channel, command_rx).await;
    }
}
