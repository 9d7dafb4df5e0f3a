use std::time::Duration;

pub const BRIDGE_URL: &str = "BRIDGE_URL";
pub const BRIDGE_TOKEN: &str = "BRIDGE_TOKEN";

pub const DEFAULT_URL: &str = "ws://127.0.0.1:8765/assistant";
pub const DEFAULT_ACK_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_CAPACITY: usize = 128;

pub const AUTHORIZATION_HEADER: &str = "Authorization";
