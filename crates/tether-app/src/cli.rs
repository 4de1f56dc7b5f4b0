use clap::{Parser, Subcommand};

/// Tether: page <-> native host message bridge tooling.
#[derive(Parser, Debug)]
#[command(name = "tether", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log level override (trace, debug, info, warn, error, or a full filter directive).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the wire text for an envelope.
    Encode {
        event: String,
        /// JSON payload (defaults to `{}`).
        #[arg(short, long)]
        data: Option<String>,
    },
    /// Decode wire text the way the page receiver does.
    Decode { text: String },
    /// Print the script the host injects to deliver an envelope.
    Script {
        event: String,
        /// JSON payload (defaults to `{}`).
        #[arg(short, long)]
        data: Option<String>,
    },
    /// Run wire text through the demo handler map.
    Dispatch { text: String },
    /// Print the page initialization script for a `window.ipc` host.
    InitScript,
    /// Send an event from an in-process page to an in-process host and back.
    Loopback {
        #[arg(short, long, default_value = "cameraRoll")]
        event: String,
        /// JSON payload (defaults to `{}`).
        #[arg(short, long)]
        data: Option<String>,
    },
}

pub fn parse() -> Args {
    Args::parse()
}
