use anyhow::Result;
use async_trait::async_trait;
use znatok_types::{AssistantState, InboundEvent, ReadActionId};

/// A voice-assistant dialogue channel that can drive the quiz remotely.
///
/// The runtime depends on this trait rather than on a concrete transport, so
/// the session loop can be exercised against a mock in tests.
#[async_trait]
pub trait DialogueChannel: Send + Sync {
    /// Asks the channel to read `text` aloud.
    ///
    /// Resolves once the channel acknowledges the request, or fails when no
    /// acknowledgment arrives in time.
    async fn read_aloud(&mut self, action_id: ReadActionId, text: String) -> Result<()>;

    /// Tells the channel which question is currently on screen.
    async fn publish_state(&mut self, state: AssistantState) -> Result<()>;

    /// Returns a receiver of everything the channel pushes to us. Can be taken once.
    async fn inbound_events(&mut self) -> Result<tokio::sync::mpsc::Receiver<InboundEvent>>;
}
