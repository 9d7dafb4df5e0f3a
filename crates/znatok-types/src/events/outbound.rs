use crate::state::AssistantState;

/// Which voice action the channel should perform with the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ReadActionId {
    /// Read a verdict or any other message.
    #[serde(rename = "read")]
    Read,
    /// Read the current question.
    #[serde(rename = "read_q")]
    ReadQuestion,
}

/// A one-shot read-aloud request.
///
/// Serializes as `{"action": {"action_id": "read", "parameters": {"value": "..."}}}`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReadRequest {
    action: ReadAction,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
struct ReadAction {
    action_id: ReadActionId,
    parameters: ReadParameters,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
struct ReadParameters {
    value: String,
}

impl ReadRequest {
    pub fn new(action_id: ReadActionId, value: &str) -> Self {
        Self {
            action: ReadAction {
                action_id,
                parameters: ReadParameters {
                    value: value.to_string(),
                },
            },
        }
    }

    pub fn action_id(&self) -> ReadActionId {
        self.action.action_id
    }

    pub fn value(&self) -> &str {
        &self.action.parameters.value
    }
}

/// Publishes the assistant-visible quiz state.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StateMessage {
    pub state: AssistantState,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum OutboundMessage {
    Read(ReadRequest),
    State(StateMessage),
}

impl From<ReadRequest> for OutboundMessage {
    fn from(request: ReadRequest) -> Self {
        OutboundMessage::Read(request)
    }
}

impl From<AssistantState> for OutboundMessage {
    fn from(state: AssistantState) -> Self {
        OutboundMessage::State(StateMessage { state })
    }
}
