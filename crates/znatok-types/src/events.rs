mod inbound;
mod outbound;

pub use inbound::{Ack, InboundEvent, LifecycleEvent, RawAction};
pub use outbound::{OutboundMessage, ReadActionId, ReadRequest, StateMessage};
