//! Core TOML config loading: read from path or platform default.

use crate::schema::BridgeConfig;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tether_common::ConfigError;
use tracing::{debug, info, warn};

use super::template::default_config_toml;

/// Environment variable naming a config file to use instead of the default.
pub const CONFIG_ENV_VAR: &str = "TETHER_CONFIG";

/// Load config from a specific TOML file path.
///
/// Missing fields fall back to serde defaults. Validation failures are
/// logged here and left to the caller; `crate::load_config` enforces them.
pub fn load_from_path(path: &Path) -> Result<BridgeConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: BridgeConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = crate::validation::validate(&config) {
        warn!("config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from [`default_config_path`].
///
/// A missing file at the platform location is created from the commented
/// template and defaults are returned. A missing file named by
/// `TETHER_CONFIG` is an error: the host asked for that file explicitly.
pub fn load_default() -> Result<BridgeConfig, ConfigError> {
    if let Some(path) = env_override() {
        return load_from_path(&path);
    }
    let path = platform_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(BridgeConfig::default())
        }
        Err(e) => Err(e),
    }
}

/// The config file `load_default` reads: `$TETHER_CONFIG` when set, else
/// `<config dir>/tether/config.toml`.
///
/// On macOS: `~/Library/Application Support/tether/config.toml`
/// On Linux: `~/.config/tether/config.toml`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    match env_override() {
        Some(path) => Ok(path),
        None => platform_config_path(),
    }
}

/// Write the commented template to `path`, creating parent directories.
///
/// Never replaces an existing file, so two hosts starting at once cannot
/// clobber a config the user already edited.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |e: std::io::Error| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!("config already exists at {}, left untouched", path.display());
            return Ok(());
        }
        Err(e) => return Err(write_error(e)),
    };
    file.write_all(default_config_toml().as_bytes())
        .map_err(write_error)?;

    info!("created default config at {}", path.display());
    Ok(())
}

fn env_override() -> Option<PathBuf> {
    path_override(std::env::var_os(CONFIG_ENV_VAR))
}

/// An empty variable counts as unset.
pub(super) fn path_override(value: Option<std::ffi::OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

fn platform_config_path() -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(dir.join("tether").join("config.toml"))
}
