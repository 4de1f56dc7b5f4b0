use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use tether_common::BridgeError;
use tether_config::{DispatchConfig, ParsePolicy};
use tracing::{debug, warn};

use super::host_event::HostEvent;
use crate::envelope::{kind_of, within_limit, Envelope, Inbound};

/// Handler invoked with the envelope `data`. Its return value is handed back
/// to the caller of the dispatcher (typically to answer via the `Responder`).
pub type Handler = Box<dyn Fn(Value) -> Option<Value> + Send + Sync>;

/// Event name -> handler, built by the host before dispatching starts.
#[derive(Default)]
pub struct HandlerMap {
    handlers: HashMap<String, Handler>,
}

impl HandlerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn on<F>(mut self, event: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Value) -> Option<Value> + Send + Sync + 'static,
    {
        self.insert(event, handler);
        self
    }

    /// Register `handler` for `event`. Returns `true` if it replaced one.
    pub fn insert<F>(&mut self, event: impl Into<String>, handler: F) -> bool
    where
        F: Fn(Value) -> Option<Value> + Send + Sync + 'static,
    {
        self.handlers
            .insert(event.into(), Box::new(handler))
            .is_some()
    }

    pub fn contains(&self, event: &str) -> bool {
        self.handlers.contains_key(event)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered event names, sorted.
    pub fn events(&self) -> Vec<&str> {
        let mut events: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        events.sort_unstable();
        events
    }

    fn get(&self, event: &str) -> Option<&Handler> {
        self.handlers.get(event)
    }
}

impl fmt::Debug for HandlerMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.events()).finish()
    }
}

/// Routes envelopes posted by the page to the handler for their event.
#[derive(Debug)]
pub struct Dispatcher {
    handlers: HandlerMap,
    policy: ParsePolicy,
    max_payload_bytes: usize,
}

impl Dispatcher {
    /// Lenient dispatcher with the default payload limit.
    pub fn new(handlers: HandlerMap) -> Self {
        Self::from_config(handlers, &DispatchConfig::default())
    }

    pub fn from_config(handlers: HandlerMap, config: &DispatchConfig) -> Self {
        Self {
            handlers,
            policy: config.parse_policy,
            max_payload_bytes: config.max_payload_bytes,
        }
    }

    pub fn with_policy(mut self, policy: ParsePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ParsePolicy {
        self.policy
    }

    pub fn handlers(&self) -> &HandlerMap {
        &self.handlers
    }

    /// Handle one message event from the host's WebView component.
    ///
    /// Events without a payload are ignored. Unknown or missing event names
    /// are logged and dropped; they never produce an error. Errors only come
    /// from unparseable payloads under [`ParsePolicy::Strict`].
    pub fn dispatch(&self, event: &HostEvent) -> Result<Option<Value>, BridgeError> {
        let Some(payload) = event.payload() else {
            return Ok(None);
        };
        let envelope = match payload {
            Value::String(text) => self.parse_text(text)?,
            other => self.accept_structured(other)?,
        };
        Ok(envelope.and_then(|envelope| self.route(envelope)))
    }

    /// Handle a message body handed over as text (e.g. a `wry` IPC request).
    pub fn dispatch_raw(&self, body: &str) -> Result<Option<Value>, BridgeError> {
        if body.is_empty() {
            return Ok(None);
        }
        Ok(self.parse_text(body)?.and_then(|envelope| self.route(envelope)))
    }

    fn parse_text(&self, text: &str) -> Result<Option<Envelope>, BridgeError> {
        if !within_limit(text, self.max_payload_bytes) {
            let reason = format!(
                "payload of {} bytes exceeds limit of {}",
                text.len(),
                self.max_payload_bytes
            );
            return match self.policy {
                ParsePolicy::Strict => Err(BridgeError::MalformedEnvelope(reason)),
                ParsePolicy::Lenient => {
                    warn!("message from page dropped: {reason}");
                    Ok(None)
                }
            };
        }

        match self.policy {
            ParsePolicy::Strict => Envelope::parse_strict(text).map(Some),
            ParsePolicy::Lenient => {
                let inbound = Inbound::decode(text);
                if inbound.is_raw() {
                    warn!(body_len = text.len(), "message from page is not valid JSON");
                }
                Ok(Some(inbound.into_envelope()))
            }
        }
    }

    fn accept_structured(&self, value: &Value) -> Result<Option<Envelope>, BridgeError> {
        if self.policy == ParsePolicy::Strict && !value.is_object() {
            return Err(BridgeError::MalformedEnvelope(format!(
                "expected a JSON object, got {}",
                kind_of(value)
            )));
        }
        Ok(Some(Envelope::from_value(value.clone())))
    }

    fn route(&self, envelope: Envelope) -> Option<Value> {
        let Envelope { event, data, .. } = envelope;
        let name = event.as_deref().filter(|name| !name.is_empty());
        match name.and_then(|name| self.handlers.get(name)) {
            Some(handler) => {
                debug!(event = ?name, "dispatching message from page");
                handler(data)
            }
            None => {
                warn!(event = ?event, "no handler for event");
                None
            }
        }
    }
}

/// Closure form of a lenient [`Dispatcher`], for hosts that register a plain
/// callback. Strict-mode errors cannot occur; the result of the matching
/// handler is returned.
pub fn handle_messages(handlers: HandlerMap) -> impl Fn(&HostEvent) -> Option<Value> {
    let dispatcher = Dispatcher::new(handlers);
    move |event: &HostEvent| match dispatcher.dispatch(event) {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, "message dispatch failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;

    /// Handler map with one `foo` handler recording every call.
    fn foo_map() -> (HandlerMap, Arc<Mutex<Vec<Value>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let map = HandlerMap::new().on("foo", move |data| {
            sink.lock().unwrap().push(data);
            Some(json!("handled"))
        });
        (map, calls)
    }

    #[test]
    fn calls_matching_handler_once() {
        let (map, calls) = foo_map();
        let dispatcher = Dispatcher::new(map);

        let result = dispatcher
            .dispatch(&HostEvent::message(r#"{"event":"foo","data":{"x":1}}"#))
            .unwrap();

        assert_eq!(result, Some(json!("handled")));
        assert_eq!(calls.lock().unwrap().as_slice(), [json!({"x": 1})]);
    }

    #[test]
    fn unknown_event_is_dropped() {
        let (map, calls) = foo_map();
        let dispatcher = Dispatcher::new(map);

        let result = dispatcher
            .dispatch(&HostEvent::message(r#"{"event":"bar","data":1}"#))
            .unwrap();

        assert_eq!(result, None);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn missing_event_is_dropped() {
        let (map, calls) = foo_map();
        let dispatcher = Dispatcher::new(map);
        assert_eq!(
            dispatcher
                .dispatch(&HostEvent::message(r#"{"data":1}"#))
                .unwrap(),
            None
        );
        assert_eq!(
            dispatcher
                .dispatch(&HostEvent::message(r#"{"event":"","data":1}"#))
                .unwrap(),
            None
        );
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn structured_payload_is_used_directly() {
        let (map, calls) = foo_map();
        let dispatcher = Dispatcher::new(map);
        dispatcher
            .dispatch(&HostEvent::structured(json!({"event": "foo", "data": [1, 2]})))
            .unwrap();
        assert_eq!(calls.lock().unwrap().as_slice(), [json!([1, 2])]);
    }

    #[test]
    fn events_without_payload_do_nothing() {
        let (map, calls) = foo_map();
        let dispatcher = Dispatcher::new(map);
        assert_eq!(dispatcher.dispatch(&HostEvent::default()).unwrap(), None);
        assert_eq!(dispatcher.dispatch(&HostEvent::message("")).unwrap(), None);
        assert_eq!(dispatcher.dispatch_raw("").unwrap(), None);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn lenient_policy_drops_malformed_text() {
        let (map, calls) = foo_map();
        let dispatcher = Dispatcher::new(map);
        assert_eq!(dispatcher.policy(), ParsePolicy::Lenient);
        assert_eq!(dispatcher.dispatch_raw("not-json").unwrap(), None);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn strict_policy_rejects_malformed_text() {
        let (map, _) = foo_map();
        let dispatcher = Dispatcher::new(map).with_policy(ParsePolicy::Strict);
        assert!(matches!(
            dispatcher.dispatch(&HostEvent::message("not-json")),
            Err(BridgeError::MalformedEnvelope(_))
        ));
        assert!(matches!(
            dispatcher.dispatch(&HostEvent::structured(json!([1]))),
            Err(BridgeError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn strict_policy_still_drops_unknown_events() {
        let (map, _) = foo_map();
        let dispatcher = Dispatcher::new(map).with_policy(ParsePolicy::Strict);
        assert_eq!(
            dispatcher
                .dispatch_raw(r#"{"event":"bar","data":{}}"#)
                .unwrap(),
            None
        );
    }

    #[test]
    fn payload_limit_applies_to_text() {
        let (map, calls) = foo_map();
        let config = DispatchConfig {
            parse_policy: ParsePolicy::Lenient,
            max_payload_bytes: 10,
        };
        let dispatcher = Dispatcher::from_config(map, &config);
        assert_eq!(
            dispatcher
                .dispatch_raw(r#"{"event":"foo","data":{}}"#)
                .unwrap(),
            None
        );
        assert!(calls.lock().unwrap().is_empty());

        let strict = Dispatcher::from_config(HandlerMap::new(), &config)
            .with_policy(ParsePolicy::Strict);
        let err = strict
            .dispatch_raw(r#"{"event":"foo","data":{}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("exceeds limit"));
    }

    #[test]
    fn round_trips_encoded_envelopes() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let dispatcher = Dispatcher::new(HandlerMap::new().on("cameraRoll", move |data| {
            sink.lock().unwrap().push(data);
            None
        }));

        let samples = [json!({}), json!(null), json!(["a", 1]), json!("it's \\ fine")];
        for data in samples.clone() {
            let text = Envelope::new("cameraRoll", data).to_json().unwrap();
            dispatcher.dispatch(&HostEvent::message(text)).unwrap();
        }
        assert_eq!(seen.lock().unwrap().as_slice(), samples);
    }

    #[test]
    fn handle_messages_closure() {
        let (map, calls) = foo_map();
        let handler = handle_messages(map);
        assert_eq!(
            handler(&HostEvent::message(r#"{"event":"foo","data":null}"#)),
            Some(json!("handled"))
        );
        assert_eq!(handler(&HostEvent::message("garbage")), None);
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn handler_map_bookkeeping() {
        let mut map = HandlerMap::new().on("b", |_| None).on("a", |_| None);
        assert_eq!(map.len(), 2);
        assert!(map.contains("a"));
        assert!(!map.contains("c"));
        assert_eq!(map.events(), ["a", "b"]);
        assert!(map.insert("a", |_| Some(json!(1))));
        assert_eq!(map.len(), 2);
        assert_eq!(format!("{map:?}"), r#"{"a", "b"}"#);
    }
}
