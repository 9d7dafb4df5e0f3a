use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("already connected")]
    AlreadyConnected,
    #[error("not connected yet")]
    NotConnected,
    #[error("dialogue channel closed")]
    Closed,
    #[error("no acknowledgment received within {0:?}")]
    AckTimeout(Duration),
    #[error(transparent)]
    WebSocket(#[from] Box<tokio_tungstenite::tungstenite::Error>),
}

impl From<tokio_tungstenite::tungstenite::Error> for BridgeError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        BridgeError::WebSocket(Box::new(e))
    }
}
