//! Tether configuration system.
//!
//! Provides TOML-based configuration for the page/host bridge: receiver and
//! marker names, the script injection strategy, the dispatch parse policy,
//! and logging. All sections use defaults matching a React Native host, so
//! partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tether_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    BridgeConfig, DetectionConfig, DispatchConfig, InjectionStrategy, LogLevel, ParsePolicy,
    CONFIG_SCHEMA_VERSION,
};
pub use validation::validate;

use std::path::Path;
use tether_common::ConfigError;

/// Load config from the platform default path and validate it.
///
/// Creates a default `config.toml` in the OS config directory if none exists.
pub fn load_config() -> Result<BridgeConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path and validate it.
pub fn load_config_from(path: &Path) -> Result<BridgeConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &BridgeConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let json = config_to_json(&BridgeConfig::default());
        assert!(json.contains("\"receiver\""));
        assert!(json.contains("\"detection\""));
        assert!(json.contains("\"responder\""));
        assert!(json.contains("\"dispatch\""));
        assert!(json.contains("\"logging\""));
        assert!(json.contains("\"evaluate_javascript\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let json = config_to_json(&BridgeConfig::default());
        let parsed: BridgeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.receiver.name, "receivedMessageFromReactNative");
        assert_eq!(parsed.dispatch.parse_policy, ParsePolicy::Lenient);
    }

    #[test]
    fn load_config_from_rejects_invalid_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[detection]\nmessage_handler = \"a b\"\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
