use crate::client::consts::{BRIDGE_TOKEN, BRIDGE_URL, DEFAULT_ACK_TIMEOUT, DEFAULT_URL};
use secrecy::SecretString;
use std::time::Duration;

pub struct Config {
    url: String,
    token: SecretString,
    ack_timeout: Duration,
}

pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::new(),
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.config.url = url.to_string();
        self
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.config.token = SecretString::from(token.to_string());
        self
    }

    pub fn with_ack_timeout(mut self, ack_timeout: Duration) -> Self {
        self.config.ack_timeout = ack_timeout;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    // Defaults come from the environment where present.
    pub fn new() -> Self {
        Self {
            url: std::env::var(BRIDGE_URL).unwrap_or_else(|_| DEFAULT_URL.to_string()),
            // An empty token means the channel needs no authorization header.
            token: std::env::var(BRIDGE_TOKEN).unwrap_or_default().into(),
            ack_timeout: DEFAULT_ACK_TIMEOUT,
        }
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }

    pub fn ack_timeout(&self) -> Duration {
        self.ack_timeout
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
