use std::collections::VecDeque;
use tokio::sync::oneshot;
use znatok_types::Ack;

/// Read requests still waiting for their acknowledgment.
///
/// The assistant acknowledges reads in the order they were sent and the ack
/// carries no correlation id, so each ack goes to the oldest live waiter.
#[derive(Debug, Default)]
pub(crate) struct PendingAcks {
    waiters: VecDeque<oneshot::Sender<Ack>>,
}

impl PendingAcks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(&mut self) -> oneshot::Receiver<Ack> {
        let (tx, rx) = oneshot::channel();
        self.waiters.push_back(tx);
        rx
    }

    /// Hands `ack` to the oldest waiter that is still listening.
    /// Returns false when nobody took it.
    pub(crate) fn resolve(&mut self, ack: Ack) -> bool {
        let mut ack = ack;
        while let Some(waiter) = self.waiters.pop_front() {
            match waiter.send(ack) {
                Ok(()) => return true,
                Err(returned) => ack = returned,
            }
        }
        false
    }

    /// Drops waiters whose caller gave up.
    pub(crate) fn prune(&mut self) {
        self.waiters.retain(|waiter| !waiter.is_closed());
    }

    pub(crate) fn clear(&mut self) {
        self.waiters.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.waiters.len()
    }
}
