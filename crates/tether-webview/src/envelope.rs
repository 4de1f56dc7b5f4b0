//! The `{event, data}` envelope exchanged in both directions.
//!
//! Encoding always produces one JSON text with exactly the two fields
//! `event` and `data`. Decoding is lenient: text that is not JSON is kept
//! as [`Inbound::Raw`], and JSON that is not an envelope as
//! [`Inbound::Value`], so page and host can drift apart in version without
//! the bridge throwing or losing data.

use serde::Serialize;
use serde_json::{Map, Value};
use tether_common::BridgeError;

/// One message unit on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    /// Event name used to pick the handler on the receiving side.
    /// `None` only for envelopes decoded from text that carried no event.
    pub event: Option<String>,
    /// Arbitrary payload.
    pub data: Value,
    /// Fields beside `event` and `data` on a decoded envelope. Never encoded.
    #[serde(skip)]
    pub extra: Map<String, Value>,
}

impl Envelope {
    /// Create an envelope for `event` carrying `data`.
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: Some(event.into()),
            data,
            extra: Map::new(),
        }
    }

    /// Create an envelope with the default empty-object payload.
    pub fn signal(event: impl Into<String>) -> Self {
        Self::new(event, Value::Object(Default::default()))
    }

    /// Degraded envelope for text that could not be parsed: no event, the
    /// raw text as data.
    pub fn degraded(raw: impl Into<String>) -> Self {
        Self {
            event: None,
            data: Value::String(raw.into()),
            extra: Map::new(),
        }
    }

    /// Build an envelope from an already-structured value.
    ///
    /// Objects contribute their `event` (when it is a string) and `data`
    /// (missing -> `null`); remaining fields land in `extra`. Any other value
    /// becomes the data of an envelope without an event.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) => {
                let event = match map.remove("event") {
                    Some(Value::String(s)) => Some(s),
                    Some(other) => {
                        // Keep a non-string event visible to the receiver.
                        map.insert("event".to_string(), other);
                        None
                    }
                    None => None,
                };
                let data = map.remove("data").unwrap_or(Value::Null);
                Self {
                    event,
                    data,
                    extra: map,
                }
            }
            other => Self {
                event: None,
                data: other,
                extra: Map::new(),
            },
        }
    }

    /// Whether `value` has the envelope shape: an object with a string `event`.
    pub fn is_envelope_shaped(value: &Value) -> bool {
        matches!(value.get("event"), Some(Value::String(_)))
    }

    /// The event name, treating an empty name the same as a missing one.
    pub fn event(&self) -> Option<&str> {
        self.event.as_deref().filter(|e| !e.is_empty())
    }

    /// Serialize to the single-text wire form.
    ///
    /// Envelopes without an event name (degraded or decoded ones) have no
    /// wire form and fail with [`BridgeError::InvalidEvent`].
    pub fn to_json(&self) -> Result<String, BridgeError> {
        if self.event().is_none() {
            return Err(BridgeError::InvalidEvent(
                self.event.clone().unwrap_or_default(),
            ));
        }
        Ok(serde_json::to_string(self)?)
    }

    /// Parse wire text, failing on anything that is not a JSON object.
    pub fn parse_strict(text: &str) -> Result<Self, BridgeError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| BridgeError::MalformedEnvelope(e.to_string()))?;
        if !value.is_object() {
            return Err(BridgeError::MalformedEnvelope(format!(
                "expected a JSON object, got {}",
                kind_of(&value)
            )));
        }
        Ok(Self::from_value(value))
    }
}

/// What a receiver actually gets. Nothing the sender put on the wire is
/// dropped on the way.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// An object with a string `event`.
    Envelope(Envelope),
    /// Valid JSON without the envelope shape, exactly as parsed.
    Value(Value),
    /// Text that is not valid JSON, unchanged.
    Raw(String),
}

impl Inbound {
    /// Decode wire text without ever failing.
    pub fn decode(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) if Envelope::is_envelope_shaped(&value) => {
                Inbound::Envelope(Envelope::from_value(value))
            }
            Ok(value) => Inbound::Value(value),
            Err(_) => Inbound::Raw(text.to_string()),
        }
    }

    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            Inbound::Envelope(envelope) => Some(envelope),
            Inbound::Value(_) | Inbound::Raw(_) => None,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Inbound::Raw(_))
    }

    /// Collapse into an envelope. JSON without the envelope shape goes
    /// through [`Envelope::from_value`]; raw text through
    /// [`Envelope::degraded`].
    pub fn into_envelope(self) -> Envelope {
        match self {
            Inbound::Envelope(envelope) => envelope,
            Inbound::Value(value) => Envelope::from_value(value),
            Inbound::Raw(raw) => Envelope::degraded(raw),
        }
    }
}

/// True when `text` fits under `limit` bytes (0 means unlimited).
pub(crate) fn within_limit(text: &str, limit: usize) -> bool {
    limit == 0 || text.len() <= limit
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
