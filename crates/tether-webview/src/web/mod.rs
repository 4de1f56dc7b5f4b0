//! Page side of the bridge.
//!
//! `WebBridge` posts envelopes to the host ([`sender`]) and installs the
//! receiver the host calls back into ([`listener`]). It is built once per
//! page from a resolved [`Transport`] and the page's [`ReceiverSlot`].

use std::sync::Arc;

use serde_json::Value;
use tether_config::{BridgeConfig, DispatchConfig};

use crate::environment::{HostChannel, Transport};

mod listener;
mod sender;
mod slot;

pub use listener::ListenerGuard;
pub use slot::{Receiver, ReceiverSlot};

/// Page-side endpoint of the bridge.
#[derive(Debug, Clone)]
pub struct WebBridge {
    transport: Transport,
    /// `None` models a page without a global scope to install into.
    slot: Option<ReceiverSlot>,
    /// Inbound messages longer than this are dropped. 0 disables the limit.
    /// Defaults to the same limit the host-side `Dispatcher` applies.
    max_payload_bytes: usize,
}

impl WebBridge {
    /// Create a bridge that installs its receiver into `slot`.
    pub fn new(transport: Transport, slot: ReceiverSlot) -> Self {
        Self {
            transport,
            slot: Some(slot),
            max_payload_bytes: DispatchConfig::default().max_payload_bytes,
        }
    }

    /// Create a bridge with nowhere to install a receiver. Sending still
    /// works; listening fails with `GlobalScopeUnavailable` when embedded.
    pub fn detached(transport: Transport) -> Self {
        Self {
            transport,
            slot: None,
            max_payload_bytes: DispatchConfig::default().max_payload_bytes,
        }
    }

    /// Resolve the transport from a snapshot of the page globals and apply
    /// the configured limits.
    pub fn from_config(
        config: &BridgeConfig,
        globals: &Value,
        channel: Option<Arc<dyn HostChannel>>,
        slot: ReceiverSlot,
    ) -> Self {
        let transport = Transport::resolve(globals, &config.detection, channel);
        Self::new(transport, slot).with_max_payload_bytes(config.dispatch.max_payload_bytes)
    }

    pub fn with_max_payload_bytes(mut self, limit: usize) -> Self {
        self.max_payload_bytes = limit;
        self
    }

    /// Whether the page runs inside a native host.
    pub fn is_embedded(&self) -> bool {
        self.transport.is_embedded()
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn slot(&self) -> Option<&ReceiverSlot> {
        self.slot.as_ref()
    }
}
