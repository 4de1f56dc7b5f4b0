//! Full configuration validation.
//!
//! Every name in the config ends up inside generated JavaScript, so each one
//! must be a plain identifier. This orchestrator runs all checks and collects
//! the errors into a single `ConfigError`.

mod identifiers;


use crate::schema::BridgeConfig;
use tether_common::ConfigError;

pub use identifiers::{is_js_identifier, is_js_member_path};

/// Upper bound accepted for `dispatch.max_payload_bytes`.
pub const MAX_PAYLOAD_LIMIT: usize = 64 * 1024 * 1024;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &BridgeConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    identifiers::validate_names(&mut errors, config);

    if config.dispatch.max_payload_bytes > MAX_PAYLOAD_LIMIT {
        errors.push(format!(
            "dispatch.max_payload_bytes = {} is out of range [0, {MAX_PAYLOAD_LIMIT}]",
            config.dispatch.max_payload_bytes
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
