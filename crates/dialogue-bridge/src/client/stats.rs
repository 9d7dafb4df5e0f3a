#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Stats {
    reads_sent: u64,
    acks_received: u64,
    ack_timeouts: u64,
    unmatched_acks: u64,
    events_received: u64,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_read(&mut self) {
        self.reads_sent += 1;
    }

    pub(crate) fn record_ack(&mut self) {
        self.acks_received += 1;
    }

    pub(crate) fn record_timeout(&mut self) {
        self.ack_timeouts += 1;
    }

    pub(crate) fn record_unmatched_ack(&mut self) {
        self.unmatched_acks += 1;
    }

    pub(crate) fn record_event(&mut self) {
        self.events_received += 1;
    }

    pub fn reads_sent(&self) -> u64 {
        self.reads_sent
    }

    pub fn acks_received(&self) -> u64 {
        self.acks_received
    }

    pub fn ack_timeouts(&self) -> u64 {
        self.ack_timeouts
    }

    pub fn unmatched_acks(&self) -> u64 {
        self.unmatched_acks
    }

    pub fn events_received(&self) -> u64 {
        self.events_received
    }
}
