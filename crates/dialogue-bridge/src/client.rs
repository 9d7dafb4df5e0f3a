use crate::client::pending::PendingAcks;
use crate::client::stats::Stats;
use crate::error::BridgeError;
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_tungstenite::tungstenite::Message;
use znatok_types::{Ack, AssistantState, InboundEvent, OutboundMessage, ReadRequest};

pub mod config;
pub mod stats;
mod consts;
mod pending;
mod utils;

pub type OutboundTx = tokio::sync::mpsc::Sender<OutboundMessage>;
type InboundTx = tokio::sync::broadcast::Sender<InboundEvent>;
pub type InboundRx = tokio::sync::broadcast::Receiver<InboundEvent>;

/// Operations the quiz needs from the assistant's dialogue channel.
#[async_trait]
pub trait BridgeClient: Send + Sync {
    /// Sends a read-aloud request and waits for the assistant to acknowledge it.
    async fn read_aloud(&mut self, request: ReadRequest) -> Result<Ack, BridgeError>;

    /// Pushes the quiz context the assistant should know about.
    async fn publish_state(&mut self, state: AssistantState) -> Result<(), BridgeError>;

    /// Subscribes to events pushed by the assistant. Acks are consumed by
    /// `read_aloud` and never show up here.
    async fn inbound_events(&mut self) -> Result<InboundRx, BridgeError>;
}

// Channel capacity, the outbound transmitter, the inbound broadcaster that the
// reader task clears on disconnect, acks waiting for a response, and stats.
pub struct Client {
    capacity: usize,
    config: config::Config,
    c_tx: Option<OutboundTx>,
    s_tx: Arc<Mutex<Option<InboundTx>>>,
    // Subscribed before the reader starts, so events sent right after the
    // handshake are buffered for the first `inbound_events` call.
    first_rx: Option<InboundRx>,
    pending: Arc<Mutex<PendingAcks>>,
    stats: Arc<Mutex<Stats>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn record(stats: &Mutex<Stats>, update: impl FnOnce(&mut Stats)) {
    if let Ok(mut stats_guard) = stats.lock() {
        update(&mut stats_guard);
    } else {
        tracing::error!("failed to update stats");
    }
}

impl Client {
    fn new(capacity: usize, config: config::Config) -> Self {
        Self {
            capacity,
            config,
            c_tx: None,
            s_tx: Arc::new(Mutex::new(None)),
            first_rx: None,
            pending: Arc::new(Mutex::new(PendingAcks::new())),
            stats: Arc::new(Mutex::new(Stats::new())),
        }
    }

    async fn connect(&mut self) -> Result<(), BridgeError> {
        if self.c_tx.is_some() {
            return Err(BridgeError::AlreadyConnected);
        }

        let request = utils::build_request(&self.config)?;
        let (ws_stream, _) = tokio_tungstenite::connect_async(request).await?;
        tracing::info!("connected to dialogue channel at {}", self.config.url());

        let (mut write, mut read) = ws_stream.split();

        let (c_tx, mut c_rx) = tokio::sync::mpsc::channel::<OutboundMessage>(self.capacity);
        let (s_tx, s_rx) = tokio::sync::broadcast::channel(self.capacity);

        self.c_tx = Some(c_tx);
        self.first_rx = Some(s_rx);
        *lock(&self.s_tx) = Some(s_tx.clone());

        // Writer: serialize outbound messages onto the socket.
        tokio::spawn(async move {
            while let Some(message) = c_rx.recv().await {
                match serde_json::to_string(&message) {
                    Ok(text) => {
                        tracing::debug!("sending message: {}", text);
                        if let Err(e) = write.send(Message::Text(text)).await {
                            tracing::error!("failed to send message: {}", e);
                        }
                    }
                    Err(e) => {
                        tracing::error!("failed to serialize message: {}", e);
                    }
                }
            }
        });

        let shared_s_tx = self.s_tx.clone();
        let pending = self.pending.clone();
        let stats = self.stats.clone();
        // Reader: acks go to the oldest waiting read, everything else is broadcast.
        tokio::spawn(async move {
            while let Some(message) = read.next().await {
                let message = match message {
                    Err(e) => {
                        tracing::error!("failed to read message: {}", e);
                        break;
                    }
                    Ok(message) => message,
                };
                match message {
                    Message::Text(text) => match InboundEvent::from_json(&text) {
                        Ok(InboundEvent::Ack(ack)) => {
                            if lock(&pending).resolve(ack) {
                                record(&stats, Stats::record_ack);
                            } else {
                                tracing::warn!("received ack with no pending request");
                                record(&stats, Stats::record_unmatched_ack);
                            }
                        }
                        Ok(event) => {
                            tracing::debug!("received event: {}", event.event_type());
                            record(&stats, Stats::record_event);
                            if let Err(e) = s_tx.send(event) {
                                tracing::debug!("no subscriber for event: {}", e.0.event_type());
                            }
                        }
                        Err(e) => {
                            tracing::error!("failed to deserialize event: {}, text=> {:?}", e, text);
                        }
                    },
                    Message::Binary(bin) => {
                        tracing::warn!("unexpected binary message: {} bytes", bin.len());
                    }
                    Message::Close(reason) => {
                        tracing::info!("connection closed: {:?}", reason);
                        break;
                    }
                    _ => {}
                }
            }
            // Wake everyone still waiting and end every subscription.
            {
                let mut pending = lock(&pending);
                if pending.len() > 0 {
                    tracing::warn!(
                        "connection ended with {} unacknowledged read requests",
                        pending.len()
                    );
                }
                pending.clear();
            }
            lock(&shared_s_tx).take();
            drop(s_tx);
        });
        Ok(())
    }

    // Return a snapshot of the stats.
    pub fn stats(&self) -> Stats {
        lock(&self.stats).clone()
    }

    fn outbound(&self) -> Result<&OutboundTx, BridgeError> {
        let tx = self.c_tx.as_ref().ok_or(BridgeError::NotConnected)?;
        if lock(&self.s_tx).is_none() {
            return Err(BridgeError::Closed);
        }
        Ok(tx)
    }

    async fn send_message(&self, message: OutboundMessage) -> Result<(), BridgeError> {
        self.outbound()?
            .send(message)
            .await
            .map_err(|_| BridgeError::Closed)
    }
}

#[async_trait]
impl BridgeClient for Client {
    async fn read_aloud(&mut self, request: ReadRequest) -> Result<Ack, BridgeError> {
        self.outbound()?;
        // Register before sending so a fast ack cannot overtake its waiter.
        let ack_rx = lock(&self.pending).register();
        if let Err(e) = self.send_message(request.into()).await {
            lock(&self.pending).prune();
            return Err(e);
        }
        record(&self.stats, Stats::record_read);

        let ack_timeout = self.config.ack_timeout();
        match tokio::time::timeout(ack_timeout, ack_rx).await {
            Ok(Ok(ack)) => Ok(ack),
            Ok(Err(_)) => Err(BridgeError::Closed),
            Err(_) => {
                lock(&self.pending).prune();
                record(&self.stats, Stats::record_timeout);
                tracing::warn!("read request not acknowledged within {:?}", ack_timeout);
                Err(BridgeError::AckTimeout(ack_timeout))
            }
        }
    }

    async fn publish_state(&mut self, state: AssistantState) -> Result<(), BridgeError> {
        self.send_message(state.into()).await
    }

    async fn inbound_events(&mut self) -> Result<InboundRx, BridgeError> {
        if self.c_tx.is_none() {
            return Err(BridgeError::NotConnected);
        }
        if let Some(rx) = self.first_rx.take() {
            return Ok(rx);
        }
        match lock(&self.s_tx).as_ref() {
            Some(tx) => Ok(tx.subscribe()),
            None => Err(BridgeError::Closed),
        }
    }
}

// Create a client with a specific config and connect to the dialogue channel.
pub async fn connect_with_config(
    capacity: usize,
    config: config::Config,
) -> Result<Client, BridgeError> {
    let mut client = Client::new(capacity, config);
    client.connect().await?;
    Ok(client)
}

// Connect with settings taken from the environment.
pub async fn connect() -> Result<Client, BridgeError> {
    connect_with_config(consts::DEFAULT_CAPACITY, config::Config::new()).await
}
