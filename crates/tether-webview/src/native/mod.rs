//! Host side of the bridge.
//!
//! The [`Dispatcher`] routes envelopes posted by the page to handlers keyed
//! by event name; the [`Responder`] pushes envelopes back into the page by
//! script injection.

mod dispatcher;
mod host_event;
mod responder;

pub use dispatcher::{handle_messages, Dispatcher, Handler, HandlerMap};
pub use host_event::{HostEvent, NativeEvent};
pub use responder::{EmbeddedView, Responder};
