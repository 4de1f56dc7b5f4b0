//! Host -> page: installing and removing the page's receiver.

use tether_common::BridgeError;
use tracing::{debug, warn};

use super::{ReceiverSlot, WebBridge};
use crate::envelope::{kind_of, within_limit, Inbound};

impl WebBridge {
    /// Install `on_message` as the page receiver, replacing any previous one.
    ///
    /// Each delivery is parsed as an envelope. JSON of any other shape is
    /// logged and passed through verbatim as [`Inbound::Value`], text that is
    /// not valid JSON as [`Inbound::Raw`], so `on_message` must handle all
    /// three.
    pub fn listen_to_host<F>(&self, on_message: F) -> Result<(), BridgeError>
    where
        F: Fn(Inbound) + Send + Sync + 'static,
    {
        if !self.is_embedded() {
            return Ok(());
        }
        let slot = self.slot.as_ref().ok_or(BridgeError::GlobalScopeUnavailable)?;

        let limit = self.max_payload_bytes;
        slot.register(move |message: &str| {
            if !within_limit(message, limit) {
                warn!(
                    body_len = message.len(),
                    limit, "message from host exceeds payload limit, dropped"
                );
                return;
            }
            let inbound = Inbound::decode(message);
            match &inbound {
                Inbound::Envelope(envelope) => {
                    debug!(event = ?envelope.event(), "message from host");
                }
                Inbound::Value(value) => {
                    warn!(
                        kind = kind_of(value),
                        "message from host has no string event, passed through as-is"
                    );
                }
                Inbound::Raw(raw) => {
                    warn!("data received from host is not valid JSON: {raw}");
                }
            }
            on_message(inbound);
        });
        Ok(())
    }

    /// Remove the page receiver. Later deliveries from the host are ignored.
    pub fn unlisten_to_host(&self) -> Result<(), BridgeError> {
        if !self.is_embedded() {
            return Ok(());
        }
        let slot = self.slot.as_ref().ok_or(BridgeError::GlobalScopeUnavailable)?;
        slot.clear();
        Ok(())
    }

    /// Like [`listen_to_host`](Self::listen_to_host), but the receiver is
    /// removed when the returned guard is dropped. Ties the listener to the
    /// lifetime of whatever view owns the guard.
    pub fn listen_scoped<F>(&self, on_message: F) -> Result<ListenerGuard, BridgeError>
    where
        F: Fn(Inbound) + Send + Sync + 'static,
    {
        self.listen_to_host(on_message)?;
        let slot = if self.is_embedded() {
            self.slot.clone()
        } else {
            None
        };
        Ok(ListenerGuard { slot })
    }
}

/// Clears the receiver slot on drop.
///
/// Clearing is unconditional: if another listener replaced this one in the
/// meantime, it is removed too, exactly as with `unlisten_to_host`.
#[must_use = "dropping the guard removes the listener immediately"]
#[derive(Debug)]
pub struct ListenerGuard {
    slot: Option<ReceiverSlot>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            slot.clear();
        }
    }
}
