//! Page -> host: fire-and-forget envelope posting.

use serde_json::Value;
use tether_common::{BridgeError, EVENT_CAMERA, EVENT_CAMERA_ROLL, EVENT_PUSH_NOTIFICATIONS};
use tracing::{debug, warn};

use super::WebBridge;
use crate::envelope::Envelope;

impl WebBridge {
    /// Post `{event, data}` to the native host.
    ///
    /// Does nothing outside a native host, or when the host did not provide
    /// a posting primitive. Exactly one message is posted otherwise; there is
    /// no acknowledgement and no retry.
    pub fn send_to_host(&self, event: &str, data: Value) -> Result<(), BridgeError> {
        if !self.is_embedded() {
            return Ok(());
        }
        if event.is_empty() {
            return Err(BridgeError::InvalidEvent(event.to_string()));
        }
        let Some(channel) = self.transport.channel() else {
            warn!(event, "native host has no postMessage primitive, message dropped");
            return Ok(());
        };

        let message = Envelope::new(event, data).to_json()?;
        debug!(event, body_len = message.len(), "posting message to host");
        channel.post_message(&message);
        Ok(())
    }

    /// Post `event` with the default empty-object payload.
    pub fn send_event(&self, event: &str) -> Result<(), BridgeError> {
        self.send_to_host(event, Value::Object(Default::default()))
    }

    /// Ask the host to open the photo library.
    pub fn open_camera_roll(&self) -> Result<(), BridgeError> {
        self.send_event(EVENT_CAMERA_ROLL)
    }

    /// Ask the host to open the camera.
    pub fn open_camera(&self) -> Result<(), BridgeError> {
        self.send_event(EVENT_CAMERA)
    }

    pub fn request_push_notifications(&self) -> Result<(), BridgeError> {
        self.send_event(EVENT_PUSH_NOTIFICATIONS)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::environment::Transport;
    use crate::web::ReceiverSlot;

    fn recording_bridge() -> (WebBridge, Arc<Mutex<Vec<String>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&sent);
        let transport = Transport::native(Arc::new(move |msg: &str| {
            sink.lock().unwrap().push(msg.to_string());
        }));
        (WebBridge::new(transport, ReceiverSlot::new()), sent)
    }

    #[test]
    fn camera_posts_one_envelope() {
        let (bridge, sent) = recording_bridge();
        bridge.send_event("camera").unwrap();

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let value: Value = serde_json::from_str(&sent[0]).unwrap();
        assert_eq!(value, json!({"event": "camera", "data": {}}));
    }

    #[test]
    fn data_is_carried() {
        let (bridge, sent) = recording_bridge();
        bridge
            .send_to_host("pushNotifications", json!({"token": "abc"}))
            .unwrap();
        assert_eq!(
            sent.lock().unwrap()[0],
            r#"{"event":"pushNotifications","data":{"token":"abc"}}"#
        );
    }

    #[test]
    fn convenience_wrappers_use_known_names() {
        let (bridge, sent) = recording_bridge();
        bridge.open_camera_roll().unwrap();
        bridge.open_camera().unwrap();
        bridge.request_push_notifications().unwrap();

        let events: Vec<String> = sent
            .lock()
            .unwrap()
            .iter()
            .map(|m| serde_json::from_str::<Value>(m).unwrap()["event"].to_string())
            .collect();
        assert_eq!(
            events,
            ["\"cameraRoll\"", "\"camera\"", "\"pushNotifications\""]
        );
    }

    #[test]
    fn browser_only_is_a_no_op() {
        let bridge = WebBridge::new(Transport::BrowserOnly, ReceiverSlot::new());
        assert!(bridge.send_event("camera").is_ok());
        assert!(bridge.open_camera().is_ok());
        // Not even validated when there is no host to send to.
        assert!(bridge.send_event("").is_ok());
    }

    #[test]
    fn missing_channel_drops_silently() {
        let bridge = WebBridge::detached(Transport::NativeBridge { channel: None });
        assert!(bridge.is_embedded());
        assert!(bridge.send_event("camera").is_ok());
    }

    #[test]
    fn empty_event_is_rejected_when_embedded() {
        let (bridge, sent) = recording_bridge();
        let err = bridge.send_event("").unwrap_err();
        assert!(matches!(err, BridgeError::InvalidEvent(_)));
        assert!(sent.lock().unwrap().is_empty());
    }
}
