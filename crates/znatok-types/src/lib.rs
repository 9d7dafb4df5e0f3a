//! Wire types shared by the quiz engine and the dialogue channel client.
pub mod events;
pub mod question;
pub mod state;

//re-export types for easier access
pub use events::{
    Ack, InboundEvent, LifecycleEvent, OutboundMessage, RawAction, ReadActionId, ReadRequest,
    StateMessage,
};
pub use question::QuestionRecord;
pub use state::AssistantState;
