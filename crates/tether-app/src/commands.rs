//! Subcommand implementations.

use serde_json::{json, Value};
use tether_common::{TetherError, EVENT_CAMERA, EVENT_CAMERA_ROLL, EVENT_PUSH_NOTIFICATIONS};
use tether_config::BridgeConfig;
use tether_webview::script::host_init_script;
use tether_webview::{Dispatcher, Envelope, HandlerMap, HostEvent, Inbound, Responder};

use crate::cli::Command;
use crate::loopback;

pub fn run(command: Command, config: &BridgeConfig) -> tether_common::Result<()> {
    match command {
        Command::Encode { event, data } => {
            let data = parse_data(data.as_deref())?;
            println!("{}", Envelope::new(event, data).to_json()?);
        }
        Command::Decode { text } => {
            println!("{}", describe(&Inbound::decode(&text)));
        }
        Command::Script { event, data } => {
            let data = parse_data(data.as_deref())?;
            println!("{}", Responder::from_config(config).script_for(&event, data)?);
        }
        Command::Dispatch { text } => {
            let dispatcher = Dispatcher::from_config(demo_handlers(), &config.dispatch);
            match dispatcher.dispatch(&HostEvent::message(text))? {
                Some(result) => println!("{result}"),
                None => println!("(no result)"),
            }
        }
        Command::InitScript => {
            print!("{}", host_init_script(config));
        }
        Command::Loopback { event, data } => {
            let data = parse_data(data.as_deref())?;
            let received = loopback::run(config, &event, data)?;
            if received.is_empty() {
                println!("(no reply)");
            }
            for inbound in &received {
                println!("{}", describe(inbound));
            }
        }
    }
    Ok(())
}

/// Handlers standing in for the native camera, photo library and push
/// registration. Each answers with a canned payload.
pub fn demo_handlers() -> HandlerMap {
    HandlerMap::new()
        .on(EVENT_CAMERA_ROLL, |data| {
            tracing::info!(%data, "demo: camera roll opened");
            Some(json!({
                "photos": [
                    {"uri": "file:///demo/IMG_0001.jpg", "width": 3024, "height": 4032},
                    {"uri": "file:///demo/IMG_0002.jpg", "width": 4032, "height": 3024}
                ]
            }))
        })
        .on(EVENT_CAMERA, |data| {
            tracing::info!(%data, "demo: camera opened");
            Some(json!({"photo": {"uri": "file:///demo/capture.jpg", "width": 3024, "height": 4032}}))
        })
        .on(EVENT_PUSH_NOTIFICATIONS, |data| {
            tracing::info!(%data, "demo: push notifications requested");
            Some(json!({"token": "demo-device-token"}))
        })
}

fn parse_data(data: Option<&str>) -> Result<Value, TetherError> {
    match data {
        None => Ok(json!({})),
        Some(text) => serde_json::from_str(text)
            .map_err(|e| TetherError::Other(format!("invalid --data JSON: {e}"))),
    }
}

fn describe(inbound: &Inbound) -> String {
    match inbound {
        Inbound::Envelope(envelope) => format!(
            "event: {}\ndata: {}",
            envelope.event().unwrap_or("(none)"),
            envelope.data
        ),
        Inbound::Value(value) => format!("json: {value}"),
        Inbound::Raw(raw) => format!("raw: {raw}"),
    }
}
