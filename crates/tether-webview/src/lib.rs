//! Message bridge between a page running inside a native WebView and the
//! native host application.
//!
//! Both directions carry the same envelope, `{"event": <string>, "data": <any>}`:
//! - **Page -> host**: [`WebBridge::send_to_host`] serializes an envelope and
//!   posts it through the host channel. The host feeds it to a [`Dispatcher`],
//!   which routes it to the handler registered for the event name.
//! - **Host -> page**: [`Responder::send_to_webview`] serializes an envelope
//!   and injects a script calling the page's receiver function. The page's
//!   [`ReceiverSlot`] hands it to the callback installed with
//!   [`WebBridge::listen_to_host`].
//!
//! Outside a native host ([`Transport::BrowserOnly`]) every page-side
//! operation is a silent no-op, so the same page runs in a plain browser tab.

pub mod envelope;
pub mod environment;
pub mod native;
pub mod script;
pub mod web;

#[cfg(feature = "wry")]
pub mod wry_host;

pub use envelope::{Envelope, Inbound};
pub use environment::{detect_embedded, HostChannel, Transport};
pub use native::{handle_messages, Dispatcher, EmbeddedView, HandlerMap, HostEvent, Responder};
pub use web::{ListenerGuard, ReceiverSlot, WebBridge};
