//! Application Configuration Module
//!
//! Loads the quiz service settings from the environment (and a `.env` file
//! when present) into one struct that `main` hands to the runtime.

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

pub const DEFAULT_BRIDGE_URL: &str = "ws://127.0.0.1:8765/assistant";
pub const DEFAULT_QUESTIONS_PATH: &str = "questions.json";
pub const DEFAULT_ACK_TIMEOUT_MS: u64 = 5000;

/// Capacity of the input and command channels between tasks.
pub const CHANNEL_CAPACITY: usize = 64;

/// Holds all configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub bridge_url: String,
    pub bridge_token: Option<String>,
    pub questions_path: PathBuf,
    pub ack_timeout: Duration,
    pub no_repeat: bool,
    pub log_level: Level,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid ACK_TIMEOUT_MS, expected a positive number of milliseconds: {0}")]
    InvalidAckTimeout(String),
    #[error("Invalid log level provided for RUST_LOG: {0}")]
    InvalidLogLevel(String),
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    // *   `BRIDGE_URL`: (Optional) WebSocket URL of the dialogue channel.
    // *   `BRIDGE_TOKEN`: (Optional) Bearer token sent when connecting.
    // *   `QUESTIONS_PATH`: (Optional) JSON question bank. Defaults to "questions.json".
    // *   `ACK_TIMEOUT_MS`: (Optional) How long a read request waits for its ack. Defaults to 5000.
    // *   `QUIZ_NO_REPEAT`: (Optional) "true" or "1" never picks the same question twice in a row.
    // *   `RUST_LOG`: (Optional) The logging level. Defaults to "INFO".
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key-value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bridge_url = lookup("BRIDGE_URL").unwrap_or_else(|| DEFAULT_BRIDGE_URL.to_string());
        let bridge_token = lookup("BRIDGE_TOKEN").filter(|token| !token.is_empty());
        let questions_path = lookup("QUESTIONS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_QUESTIONS_PATH));

        let ack_timeout = match lookup("ACK_TIMEOUT_MS") {
            None => Duration::from_millis(DEFAULT_ACK_TIMEOUT_MS),
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => return Err(ConfigError::InvalidAckTimeout(raw)),
            },
        };

        let no_repeat = lookup("QUIZ_NO_REPEAT")
            .map(|flag| matches!(flag.trim().to_lowercase().as_str(), "true" | "1"))
            .unwrap_or(false);

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str
            .parse::<Level>()
            .map_err(|_| ConfigError::InvalidLogLevel(log_level_str))?;

        Ok(Self {
            bridge_url,
            bridge_token,
            questions_path,
            ack_timeout,
            no_repeat,
            log_level,
        })
    }
}
