use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::fmt::time::ChronoLocal;
use znatok_core::dialogue_api::DialogueChannel;
use znatok_core::selector::{NoRepeatSelector, QuestionSelector, RandomSelector};
use znatok_core::{ActionDispatcher, QuestionBank};
use znatok_service::bridge_adapter::BridgeAdapter;
use znatok_service::config::{CHANNEL_CAPACITY, Config};
use znatok_service::runtime::{self, Input, Session};
use znatok_service::console;

#[derive(Parser)]
#[command(version, about = "Quiz session driven from the console and a voice assistant")]
struct Cli {
    /// JSON question bank; overrides QUESTIONS_PATH
    questions: Option<PathBuf>,
    /// Run without connecting to the dialogue channel
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load application configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Configuration loaded successfully. Starting quiz service...");

    // --- 3. Parse Command-Line Arguments ---
    let args = Cli::parse();

    // --- 4. Load the Question Bank ---
    let questions_path = args.questions.unwrap_or_else(|| config.questions_path.clone());
    let bank = QuestionBank::from_path(&questions_path)
        .with_context(|| format!("Failed to load questions from {}", questions_path.display()))?;
    tracing::info!("Loaded {} questions.", bank.len());

    let selector: Box<dyn QuestionSelector> = if config.no_repeat {
        Box::new(NoRepeatSelector::new())
    } else {
        Box::new(RandomSelector::new())
    };
    let dispatcher = ActionDispatcher::new(Arc::new(bank), selector);

    // --- 5. Channels between tasks ---
    let (input_tx, input_rx) = tokio::sync::mpsc::channel::<Input>(CHANNEL_CAPACITY);
    let (command_tx, command_rx) =
        tokio::sync::mpsc::channel::<znatok_core::Command>(CHANNEL_CAPACITY);

    // --- 6. Dialogue Channel ---
    let command_handler = if args.offline {
        tracing::info!("Running offline; the voice assistant is not connected.");
        tokio::spawn(runtime::run_offline_handler(command_rx))
    } else {
        let mut channel = BridgeAdapter::connect(&config).await?;
        let events = channel
            .inbound_events()
            .await
            .context("Failed to get dialogue events channel")?;
        tokio::spawn(runtime::forward_events(events, input_tx.clone()));
        tokio::spawn(runtime::run_command_handler(channel, command_rx))
    };

    // --- 7. Session and Console ---
    let mut session = Session::new(dispatcher, command_tx, std::io::stdout());
    session.show()?;
    let session_handle = tokio::spawn(runtime::run_session(session, input_rx));
    let console_handle = tokio::spawn(console::read_stdin(input_tx));

    tokio::select! {
        _ = session_handle => {},
        _ = command_handler => {},
        result = console_handle => {
            if let Ok(Err(e)) = result {
                tracing::error!("Console input failed: {:?}", e);
            }
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl-C, shutting down...");
        }
    }
    tracing::info!("Shutting down...");
    Ok(())
}
