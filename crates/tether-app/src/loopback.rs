//! In-process page and host wired back to back.
//!
//! The page side posts into an outbox instead of a real WebView channel, and
//! the host's "WebView" executes injected scripts by handing the embedded
//! message straight to the page's receiver slot.

use std::sync::{Arc, Mutex, PoisonError};

use serde_json::{json, Value};
use tether_common::BridgeError;
use tether_config::BridgeConfig;
use tether_webview::script::extract_receiver_argument;
use tether_webview::{
    Dispatcher, EmbeddedView, HostChannel, HostEvent, Inbound, ReceiverSlot, Responder, WebBridge,
};

use crate::commands::demo_handlers;

/// WebView stand-in that runs only receiver-call scripts.
struct PageView {
    receiver: String,
    slot: ReceiverSlot,
}

impl PageView {
    fn run(&self, script: &str) -> Result<(), BridgeError> {
        let message = extract_receiver_argument(script, &self.receiver)
            .ok_or_else(|| BridgeError::Injection(format!("unrecognised script: {script}")))?;
        if !self.slot.deliver(&message) {
            tracing::debug!("page has no receiver installed");
        }
        Ok(())
    }
}

impl EmbeddedView for PageView {
    fn evaluate_javascript(&self, script: &str) -> Result<(), BridgeError> {
        self.run(script)
    }

    fn inject_javascript(&self, script: &str) -> Result<(), BridgeError> {
        self.run(script)
    }
}

/// Send `event` from the page, let the demo host answer, and return what the
/// page's listener received.
pub fn run(config: &BridgeConfig, event: &str, data: Value) -> Result<Vec<Inbound>, BridgeError> {
    let slot = ReceiverSlot::new();
    let outbox = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = Arc::clone(&outbox);
    let channel: Arc<dyn HostChannel> = Arc::new(move |message: &str| {
        sink.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    });

    // What a native host injects before the page loads.
    let globals = json!({
        "webkit": {"messageHandlers": {config.detection.message_handler.as_str(): {}}}
    });
    let page = WebBridge::from_config(config, &globals, Some(channel), slot.clone());

    let received = Arc::new(Mutex::new(Vec::new()));
    let inbox = Arc::clone(&received);
    let _listener = page.listen_scoped(move |inbound| {
        inbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(inbound);
    })?;

    page.send_to_host(event, data)?;

    let dispatcher = Dispatcher::from_config(demo_handlers(), &config.dispatch);
    let responder = Responder::from_config(config);
    let view = PageView {
        receiver: responder.receiver().to_string(),
        slot,
    };

    let posted = std::mem::take(&mut *outbox.lock().unwrap_or_else(PoisonError::into_inner));
    for message in posted {
        let request = HostEvent::message(message);
        if let Some(reply) = dispatcher.dispatch(&request)? {
            responder.send_to_webview(Some(&view), event, reply)?;
        }
    }

    let received = std::mem::take(&mut *received.lock().unwrap_or_else(PoisonError::into_inner));
    Ok(received)
}
