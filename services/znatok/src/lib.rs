pub mod bridge_adapter;
pub mod config;
pub mod console;
pub mod runtime;

pub use dialogue_bridge::types as wire_types;
