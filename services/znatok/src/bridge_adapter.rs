use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use dialogue_bridge::BridgeClient;
use dialogue_bridge::types::{AssistantState, InboundEvent, ReadActionId, ReadRequest};
use tokio::sync::broadcast::error::RecvError;
use znatok_core::dialogue_api::DialogueChannel;

/// An adapter that implements the `DialogueChannel` trait for the `dialogue_bridge::Client`.
/// It is generic over `BridgeClient` so the underlying client can be mocked in tests.
pub struct BridgeAdapter<C: BridgeClient> {
    client: C,
    events_taken: bool,
}

impl BridgeAdapter<dialogue_bridge::Client> {
    pub async fn connect(config: &Config) -> Result<Self> {
        let bridge_config = dialogue_bridge::Config::builder()
            .with_url(&config.bridge_url)
            .with_token(config.bridge_token.as_deref().unwrap_or_default())
            .with_ack_timeout(config.ack_timeout)
            .build();
        let client = dialogue_bridge::connect_with_config(
            crate::config::CHANNEL_CAPACITY,
            bridge_config,
        )
        .await
        .with_context(|| format!("Failed to connect to dialogue channel at {}", config.bridge_url))?;
        Ok(Self::new(client))
    }
}

impl<C: BridgeClient> BridgeAdapter<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            events_taken: false,
        }
    }
}

#[async_trait]
impl<C: BridgeClient> DialogueChannel for BridgeAdapter<C> {
    async fn read_aloud(&mut self, action_id: ReadActionId, text: String) -> Result<()> {
        let ack = self
            .client
            .read_aloud(ReadRequest::new(action_id, &text))
            .await
            .context("Adapter failed to get a read request acknowledged")?;
        tracing::debug!("Read request acknowledged: {:?}", ack.payload());
        Ok(())
    }

    async fn publish_state(&mut self, state: AssistantState) -> Result<()> {
        self.client
            .publish_state(state)
            .await
            .context("Adapter failed to publish assistant state")
    }

    async fn inbound_events(&mut self) -> Result<tokio::sync::mpsc::Receiver<InboundEvent>> {
        if self.events_taken {
            return Err(anyhow::anyhow!(
                "inbound events channel has already been taken"
            ));
        }

        let mut bridge_rx = self.client.inbound_events().await?;
        let (tx, rx) = tokio::sync::mpsc::channel(crate::config::CHANNEL_CAPACITY);

        tokio::spawn(async move {
            loop {
                let event = match bridge_rx.recv().await {
                    Ok(event) => event,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Dropped {} inbound events; consumer too slow", skipped);
                        continue;
                    }
                    Err(RecvError::Closed) => {
                        tracing::info!("Dialogue channel closed; stopping adapter task.");
                        break;
                    }
                };
                if tx.send(event).await.is_err() {
                    tracing::warn!("Inbound event receiver dropped, stopping adapter task.");
                    break;
                }
            }
        });

        self.events_taken = true;
        Ok(rx)
    }
}
