mod cli;
mod commands;
mod loopback;

use std::path::Path;
use std::process::ExitCode;

use tether_config::BridgeConfig;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn load_config(path: Option<&str>) -> (BridgeConfig, Option<String>) {
    let loaded = match path {
        Some(path) => tether_config::load_config_from(Path::new(path)),
        None => tether_config::load_config(),
    };
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (BridgeConfig::default(), Some(e.to_string())),
    }
}

fn main() -> ExitCode {
    // Parse CLI arguments
    let args = cli::parse();

    // Config comes first so its log level can seed the filter
    let (config, config_error) = load_config(args.config.as_deref());

    // Initialize logging
    let log_directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.as_directive().to_string());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| LevelFilter::INFO.into()),
            ),
        )
        .init();

    tracing::debug!("Tether v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }
    if let Some(e) = config_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    match commands::run(args.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
