use serde::de::Error as _;
use serde_json::Value;

/// The `action` object carried by a data event, before it is classified.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawAction {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl RawAction {
    pub fn new(action_type: &str) -> Self {
        Self {
            action_type: action_type.to_string(),
            answer: None,
        }
    }

    pub fn with_answer(mut self, answer: &str) -> Self {
        self.answer = Some(answer.to_string());
        self
    }
}

/// Response the channel sends back for a single outbound request.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
}

impl Ack {
    pub fn new(payload: Option<Value>) -> Self {
        Self { payload }
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }
}

/// Connection lifecycle notifications of the channel itself.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    Start,
    Command(Value),
    Error(Value),
    Tts(Value),
}

/// Everything the dialogue channel can push to us.
///
/// Events are discriminated by their `type` field. The channel's own control
/// events have fixed tags; any other tag is a data event that may carry an
/// `action` for the quiz.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(try_from = "Value")]
pub enum InboundEvent {
    Character { id: Option<String> },
    Insets,
    Lifecycle(LifecycleEvent),
    Ack(Ack),
    Data {
        event_type: String,
        action: Option<RawAction>,
    },
}

impl InboundEvent {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn event_type(&self) -> &str {
        match self {
            InboundEvent::Character { .. } => "character",
            InboundEvent::Insets => "insets",
            InboundEvent::Lifecycle(LifecycleEvent::Start) => "start",
            InboundEvent::Lifecycle(LifecycleEvent::Command(_)) => "command",
            InboundEvent::Lifecycle(LifecycleEvent::Error(_)) => "error",
            InboundEvent::Lifecycle(LifecycleEvent::Tts(_)) => "tts",
            InboundEvent::Ack(_) => "ack",
            InboundEvent::Data { event_type, .. } => event_type,
        }
    }
}

impl TryFrom<Value> for InboundEvent {
    type Error = serde_json::Error;

    fn try_from(mut value: Value) -> Result<Self, Self::Error> {
        let event_type = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| serde_json::Error::missing_field("type"))?
            .to_string();

        let event = match event_type.as_str() {
            "character" => InboundEvent::Character {
                id: value
                    .pointer("/character/id")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            "insets" => InboundEvent::Insets,
            "start" => InboundEvent::Lifecycle(LifecycleEvent::Start),
            "command" => InboundEvent::Lifecycle(LifecycleEvent::Command(value)),
            "error" => InboundEvent::Lifecycle(LifecycleEvent::Error(value)),
            "tts" => InboundEvent::Lifecycle(LifecycleEvent::Tts(value)),
            "ack" => InboundEvent::Ack(Ack::new(value.get_mut("payload").map(Value::take))),
            _ => {
                let action = match value.get_mut("action").map(Value::take) {
                    None | Some(Value::Null) => None,
                    Some(action) => Some(serde_json::from_value::<RawAction>(action)?),
                };
                InboundEvent::Data { event_type, action }
            }
        };
        Ok(event)
    }
}
