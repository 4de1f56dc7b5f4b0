//! Hosting the bridge in a `wry` WebView.
//!
//! `wry` has no React Native style message event; the page posts through
//! `window.ipc.postMessage` and the host evaluates scripts directly. The init
//! script from [`host_init_script`] makes that look like a native host to the
//! page side of the bridge.

use std::sync::Arc;

use tether_common::BridgeError;
use tether_config::BridgeConfig;
use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::native::{Dispatcher, EmbeddedView};
use crate::script::host_init_script;

impl EmbeddedView for wry::WebView {
    fn evaluate_javascript(&self, script: &str) -> Result<(), BridgeError> {
        self.evaluate_script(script)
            .map_err(|e| BridgeError::Injection(e.to_string()))
    }

    fn inject_javascript(&self, script: &str) -> Result<(), BridgeError> {
        self.evaluate_javascript(script)
    }
}

/// IPC handler feeding every request body from the page to `dispatcher`.
///
/// Handler results are logged; a host that answers the page does so from
/// inside its handlers through a `Responder`.
pub fn ipc_handler(
    dispatcher: Arc<Dispatcher>,
) -> impl Fn(wry::http::Request<String>) + 'static {
    move |request| {
        let body = request.body();
        match dispatcher.dispatch_raw(body) {
            Ok(Some(result)) => debug!(%result, "IPC message handled"),
            Ok(None) => {}
            Err(e) => warn!(error = %e, body_len = body.len(), "IPC message rejected"),
        }
    }
}

/// Install the page shim and the IPC handler on a WebView under construction.
pub fn attach_bridge<'a>(
    builder: WebViewBuilder<'a>,
    config: &BridgeConfig,
    dispatcher: Arc<Dispatcher>,
) -> WebViewBuilder<'a> {
    builder
        .with_initialization_script(&host_init_script(config))
        .with_ipc_handler(ipc_handler(dispatcher))
}
