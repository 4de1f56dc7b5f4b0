use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

/// Function the host calls to deliver one message into the page.
pub type Receiver = Arc<dyn Fn(&str) + Send + Sync>;

/// Single-slot holder for the page's receiver function.
///
/// Owned by whoever hosts the page and shared (cheap clone) between the
/// bridge, which installs and clears the receiver, and the host, which
/// delivers messages into it. Registering replaces the previous receiver;
/// nothing is queued.
#[derive(Clone, Default)]
pub struct ReceiverSlot {
    inner: Arc<Mutex<Option<Receiver>>>,
}

impl ReceiverSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `receiver`, returning `true` if one was replaced.
    pub fn register<F>(&self, receiver: F) -> bool
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let previous = self.lock().replace(Arc::new(receiver));
        debug!(replaced = previous.is_some(), "receiver registered");
        previous.is_some()
    }

    /// Remove the receiver, returning `true` if one was installed.
    pub fn clear(&self) -> bool {
        let previous = self.lock().take();
        debug!(cleared = previous.is_some(), "receiver cleared");
        previous.is_some()
    }

    pub fn is_registered(&self) -> bool {
        self.lock().is_some()
    }

    /// Hand `message` to the current receiver.
    ///
    /// Returns `false` (and does nothing) when no receiver is installed. The
    /// receiver runs outside the lock, so it may clear or replace itself.
    pub fn deliver(&self, message: &str) -> bool {
        let receiver = self.lock().clone();
        match receiver {
            Some(receiver) => {
                receiver(message);
                true
            }
            None => {
                debug!(body_len = message.len(), "no receiver installed, message ignored");
                false
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Receiver>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ReceiverSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiverSlot")
            .field("registered", &self.is_registered())
            .finish()
    }
}
