use serde_json::Value;
use tether_common::BridgeError;
use tether_config::{BridgeConfig, InjectionStrategy};
use tracing::debug;

use crate::envelope::Envelope;
use crate::script::receiver_call_script;

/// The host's WebView as seen by the bridge: something that runs scripts.
///
/// Hosts expose one of two primitives. Implement the one the platform has;
/// the other reports [`BridgeError::InjectionUnsupported`].
pub trait EmbeddedView {
    fn evaluate_javascript(&self, _script: &str) -> Result<(), BridgeError> {
        Err(BridgeError::InjectionUnsupported(
            InjectionStrategy::EvaluateJavascript.primitive_name(),
        ))
    }

    fn inject_javascript(&self, _script: &str) -> Result<(), BridgeError> {
        Err(BridgeError::InjectionUnsupported(
            InjectionStrategy::InjectJavascript.primitive_name(),
        ))
    }
}

/// Pushes envelopes from the host into the page's receiver function.
#[derive(Debug, Clone)]
pub struct Responder {
    receiver: String,
    strategy: InjectionStrategy,
}

impl Responder {
    pub fn new(receiver: impl Into<String>, strategy: InjectionStrategy) -> Self {
        Self {
            receiver: receiver.into(),
            strategy,
        }
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(config.receiver.name.clone(), config.responder.injection)
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    pub fn strategy(&self) -> InjectionStrategy {
        self.strategy
    }

    /// Script delivering `{event, data}` to the page receiver.
    pub fn script_for(&self, event: &str, data: Value) -> Result<String, BridgeError> {
        if event.is_empty() {
            return Err(BridgeError::InvalidEvent(event.to_string()));
        }
        let message = Envelope::new(event, data).to_json()?;
        Ok(receiver_call_script(&self.receiver, &message))
    }

    /// Deliver `{event, data}` into the page hosted by `view`.
    ///
    /// A missing view means the host never wired the bridge up and fails
    /// before anything is serialized or injected.
    pub fn send_to_webview(
        &self,
        view: Option<&dyn EmbeddedView>,
        event: &str,
        data: Value,
    ) -> Result<(), BridgeError> {
        let view = view.ok_or(BridgeError::WebViewNotSet)?;
        let script = self.script_for(event, data)?;

        debug!(
            event,
            primitive = self.strategy.primitive_name(),
            script_len = script.len(),
            "injecting message into webview"
        );
        match self.strategy {
            InjectionStrategy::EvaluateJavascript => view.evaluate_javascript(&script),
            InjectionStrategy::InjectJavascript => view.inject_javascript(&script),
        }
    }
}

impl Default for Responder {
    fn default() -> Self {
        Self::from_config(&BridgeConfig::default())
    }
}
