use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures surfaced by the bridge itself.
///
/// Only programmer-level misconfiguration ends up here. Data-shape
/// irregularities (malformed inbound text, unknown events, running outside a
/// native host) are logged and swallowed instead.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("webview should be set up before sending messages from the native side")]
    WebViewNotSet,

    #[error("global scope not found: no receiver slot is attached to this bridge")]
    GlobalScopeUnavailable,

    #[error("invalid event name: {0:?}")]
    InvalidEvent(String),

    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("webview does not support {0}")]
    InjectionUnsupported(&'static str),

    #[error("script injection failed: {0}")]
    Injection(String),

    #[error("envelope encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum TetherError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
