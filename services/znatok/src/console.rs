//! Line-based terminal front end for the quiz.

use crate::runtime::Input;
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use znatok_core::ActionDispatcher;

/// One line typed by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Enter the text as the answer and submit it.
    Answer(String),
    Next,
    Read,
    Quit,
}

pub fn parse_line(line: &str) -> Option<ConsoleCommand> {
    let line = line.trim();
    match line {
        "" => None,
        ":next" => Some(ConsoleCommand::Next),
        ":read" => Some(ConsoleCommand::Read),
        ":quit" | ":q" => Some(ConsoleCommand::Quit),
        _ if line.starts_with(':') => {
            tracing::warn!("Unknown console command: {}", line);
            None
        }
        _ => Some(ConsoleCommand::Answer(line.to_string())),
    }
}

/// Removes HTML-like tags from feedback meant for the screen.
///
/// A `<` only opens a tag when a letter or `/` follows it and a `>` closes
/// it later on; any other `<` is kept as text.
pub fn strip_markup(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('<') {
        plain.push_str(&rest[..start]);
        let candidate = &rest[start..];
        let opens_tag = candidate[1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/');
        match candidate.find('>') {
            Some(end) if opens_tag => rest = &candidate[end + 1..],
            _ => {
                plain.push('<');
                rest = &candidate[1..];
            }
        }
    }
    plain.push_str(rest);
    plain
}

/// What the player should currently see.
pub fn render(dispatcher: &ActionDispatcher) -> String {
    let mut screen = format!("Вопрос: {}", dispatcher.current_question().text());
    let feedback = dispatcher.session().feedback();
    if !feedback.is_empty() {
        screen.push('\n');
        screen.push_str(&strip_markup(feedback));
    }
    screen
}

/// Reads stdin until EOF or `:quit`, forwarding everything else to the session task.
pub async fn read_stdin(input_tx: tokio::sync::mpsc::Sender<Input>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            None => continue,
            Some(ConsoleCommand::Quit) => break,
            Some(command) => {
                if input_tx.send(Input::Local(command)).await.is_err() {
                    tracing::warn!("Session task stopped; no longer reading the console.");
                    break;
                }
            }
        }
    }
    tracing::info!("Console input finished.");
    Ok(())
}
