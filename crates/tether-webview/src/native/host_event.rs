use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::environment::is_truthy;

/// Message event as delivered by the host's WebView component.
///
/// The payload sits at `nativeEvent.data` and is either the text posted by
/// the page or a value the host already decoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostEvent {
    #[serde(rename = "nativeEvent", default)]
    pub native_event: Option<NativeEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeEvent {
    #[serde(default)]
    pub data: Option<Value>,
}

impl HostEvent {
    /// Event carrying the text posted by the page.
    pub fn message(text: impl Into<String>) -> Self {
        Self::structured(Value::String(text.into()))
    }

    /// Event carrying an already-decoded payload.
    pub fn structured(data: Value) -> Self {
        Self {
            native_event: Some(NativeEvent { data: Some(data) }),
        }
    }

    /// The payload, if this is a message event.
    ///
    /// Empty text and `false`-like values count as absent, the same as a
    /// missing field.
    pub fn payload(&self) -> Option<&Value> {
        self.native_event
            .as_ref()?
            .data
            .as_ref()
            .filter(|data| is_truthy(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_host_shape() {
        let event: HostEvent =
            serde_json::from_value(json!({"nativeEvent": {"data": "{\"event\":\"camera\"}"}}))
                .unwrap();
        assert_eq!(event.payload(), Some(&json!("{\"event\":\"camera\"}")));
    }

    #[test]
    fn missing_fields_mean_no_payload() {
        let event: HostEvent = serde_json::from_value(json!({})).unwrap();
        assert_eq!(event.payload(), None);
        let event: HostEvent = serde_json::from_value(json!({"nativeEvent": {}})).unwrap();
        assert_eq!(event.payload(), None);
        let event: HostEvent =
            serde_json::from_value(json!({"nativeEvent": {"data": null}})).unwrap();
        assert_eq!(event.payload(), None);
    }

    #[test]
    fn empty_text_is_no_payload() {
        assert_eq!(HostEvent::message("").payload(), None);
        assert!(HostEvent::message("x").payload().is_some());
    }

    #[test]
    fn structured_payload_is_kept() {
        let event = HostEvent::structured(json!({"event": "camera", "data": {}}));
        assert!(event.payload().unwrap().is_object());
    }
}
