//! Configuration schema for the bridge.
//!
//! Every section uses serde defaults, so an empty file (or no file at all)
//! yields the names a React Native host injects out of the box.

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Default name of the page-side function the host calls to deliver messages.
pub const DEFAULT_RECEIVER_NAME: &str = "receivedMessageFromReactNative";
/// Default key under `window.webkit.messageHandlers` that marks a native host.
pub const DEFAULT_MESSAGE_HANDLER: &str = "reactNative";
/// Default marker field set when the host overrides `window.postMessage`.
pub const DEFAULT_POST_MESSAGE_MARKER: &str = "originalPostMessage";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub receiver: ReceiverConfig,
    pub detection: DetectionConfig,
    pub responder: ResponderConfig,
    pub dispatch: DispatchConfig,
    pub logging: LoggingConfig,
}

/// Page-side receiver slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverConfig {
    /// Global function name invoked by injected scripts.
    pub name: String,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_RECEIVER_NAME.into(),
        }
    }
}

/// Markers that reveal a native host around the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Looked up at `window.webkit.messageHandlers.<message_handler>`.
    pub message_handler: String,
    /// Looked up at `window.<post_message_marker>`.
    pub post_message_marker: String,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            message_handler: DEFAULT_MESSAGE_HANDLER.into(),
            post_message_marker: DEFAULT_POST_MESSAGE_MARKER.into(),
        }
    }
}

/// Host primitive used to run scripts inside the WebView.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionStrategy {
    /// `webview.evaluateJavaScript(script)` (WKWebView).
    #[default]
    EvaluateJavascript,
    /// `webview.injectJavaScript(script)` (react-native-webview).
    InjectJavascript,
}

impl InjectionStrategy {
    /// Name of the host primitive, as it appears on the view object.
    pub fn primitive_name(&self) -> &'static str {
        match self {
            InjectionStrategy::EvaluateJavascript => "evaluateJavaScript",
            InjectionStrategy::InjectJavascript => "injectJavaScript",
        }
    }
}

/// Native-to-page responder settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponderConfig {
    pub injection: InjectionStrategy,
}

/// What to do with inbound text that is not a valid envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParsePolicy {
    /// Degrade to the raw text, log a warning, keep going.
    #[default]
    Lenient,
    /// Reject with an error returned to the caller.
    Strict,
}

/// Native-side dispatch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub parse_policy: ParsePolicy,
    /// Inbound text longer than this is dropped before parsing. 0 disables the limit.
    pub max_payload_bytes: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            parse_policy: ParsePolicy::Lenient,
            max_payload_bytes: 4 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `tracing-subscriber` filter directive for this level.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

// =============================================================================
// Tests
// =============================================================================
