//! Native host detection and the outbound transport it selects.
//!
//! A host announces itself by injecting one of two markers into the page's
//! global scope: a message handler at `window.webkit.messageHandlers.<name>`,
//! or a saved copy of the original `postMessage` at `window.<marker>`.
//! Detection runs once, when the [`Transport`] is resolved; after that every
//! page-side operation just asks the transport.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tether_config::DetectionConfig;
use tracing::debug;

/// The host's message-posting primitive (`window.postMessage` on the page).
pub trait HostChannel: Send + Sync {
    fn post_message(&self, message: &str);
}

impl<F> HostChannel for F
where
    F: Fn(&str) + Send + Sync,
{
    fn post_message(&self, message: &str) {
        self(message)
    }
}

/// How the page reaches the host, resolved once at startup.
#[derive(Clone)]
pub enum Transport {
    /// Running inside a native host. `channel` is `None` when the host was
    /// detected but its posting primitive is missing.
    NativeBridge {
        channel: Option<Arc<dyn HostChannel>>,
    },
    /// Plain browser tab: every bridge operation is a no-op.
    BrowserOnly,
}

impl Transport {
    /// Transport for a page known to be embedded.
    pub fn native(channel: Arc<dyn HostChannel>) -> Self {
        Transport::NativeBridge {
            channel: Some(channel),
        }
    }

    /// Probe a snapshot of the page globals and pick the transport.
    pub fn resolve(
        globals: &Value,
        detection: &DetectionConfig,
        channel: Option<Arc<dyn HostChannel>>,
    ) -> Self {
        if detect_embedded(globals, detection) {
            Transport::NativeBridge { channel }
        } else {
            Transport::BrowserOnly
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, Transport::NativeBridge { .. })
    }

    pub(crate) fn channel(&self) -> Option<&Arc<dyn HostChannel>> {
        match self {
            Transport::NativeBridge { channel } => channel.as_ref(),
            Transport::BrowserOnly => None,
        }
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::NativeBridge { channel } => f
                .debug_struct("NativeBridge")
                .field("channel", &channel.as_ref().map(|_| "<host channel>"))
                .finish(),
            Transport::BrowserOnly => f.write_str("BrowserOnly"),
        }
    }
}

/// Whether the page globals carry a native host marker.
///
/// Missing path segments read as absent; values use JavaScript truthiness.
pub fn detect_embedded(globals: &Value, detection: &DetectionConfig) -> bool {
    let handler = globals
        .get("webkit")
        .and_then(|webkit| webkit.get("messageHandlers"))
        .and_then(|handlers| handlers.get(&detection.message_handler))
        .is_some_and(is_truthy);
    let overridden = globals
        .get(&detection.post_message_marker)
        .is_some_and(is_truthy);

    let embedded = handler || overridden;
    debug!(embedded, handler, overridden, "native host detection");
    embedded
}

/// JavaScript truthiness for a JSON value.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
