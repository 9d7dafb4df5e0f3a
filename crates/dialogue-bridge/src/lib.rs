mod client;
mod error;

pub use client::config::{Config, ConfigBuilder};
pub use client::stats::Stats;
pub use client::{BridgeClient, Client, InboundRx, connect, connect_with_config};
pub use error::BridgeError;
pub use znatok_types as types;
