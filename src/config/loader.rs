//! Configuration loading and field coercion.
//!
//! # Responsibilities
//! - Parse a TOML source into the recognized key set
//! - Coerce each present key to its schema type
//! - Apply defaults for absent keys
//! - Hand the result to semantic validation before releasing it
//!
//! # Design Decisions
//! - Unknown keys are ignored, never an error (forward compatibility)
//! - A failed load never yields a partial store
//! - Errors carry the source key name so operators can grep their config
//! - No filesystem access outside `load_config`; path writability is the
//!   log writer's problem, not the loader's

use std::fs;
use std::path::Path;

use thiserror::Error;
use toml::Value;

use crate::config::schema::{
    ConfigStore, LocalCacheBackend, LockEndpoint, LockingCacheBackend,
};
use crate::config::validation::validate;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The source could not be parsed as a key-value table at all.
    #[error("unreadable config source: {0}")]
    UnreadableSource(String),

    /// A recognized key is present but its value fails coercion or a
    /// declared constraint.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Build a validated [`ConfigStore`] from an already-parsed source.
///
/// One linear pass over the recognized key set; unknown keys are ignored,
/// absent keys take their documented defaults. Performs no I/O.
pub fn load(source: &Value) -> Result<ConfigStore, ConfigError> {
    let table = source.as_table().ok_or_else(|| {
        ConfigError::UnreadableSource(format!(
            "expected a key-value table at the top level, found {}",
            source.type_str()
        ))
    })?;

    let mut config = ConfigStore::default();

    if let Some(value) = table.get("one-click-instance") {
        config.one_click_instance = expect_bool("one-click-instance", value)?;
    }
    if let Some(value) = table.get("one-click-instance.user-limit") {
        let raw = expect_int("one-click-instance.user-limit", value)?;
        config.one_click_instance_user_limit =
            u32::try_from(raw).map_err(|_| {
                ConfigError::invalid(
                    "one-click-instance.user-limit",
                    format!("user limit must be >= 0, got {raw}"),
                )
            })?;
    }
    if let Some(value) = table.get("memcache.local") {
        let identifier = expect_str("memcache.local", value)?;
        config.local_cache = LocalCacheBackend::from_identifier(identifier)
            .ok_or_else(|| {
                ConfigError::invalid(
                    "memcache.local",
                    format!("`{identifier}` is not a supported local cache backend"),
                )
            })?;
    }
    if let Some(value) = table.get("memcache.locking") {
        let identifier = expect_str("memcache.locking", value)?;
        config.locking_cache = LockingCacheBackend::from_identifier(identifier)
            .ok_or_else(|| {
                ConfigError::invalid(
                    "memcache.locking",
                    format!("`{identifier}` is not a supported locking cache backend"),
                )
            })?;
    }
    if let Some(value) = table.get("redis") {
        config.locking_endpoint = extract_endpoint(value)?;
    }
    if let Some(value) = table.get("logfile") {
        let path = expect_str("logfile", value)?;
        if path.is_empty() {
            return Err(ConfigError::invalid("logfile", "log file path is empty"));
        }
        config.logfile = path.into();
    }
    if let Some(value) = table.get("logrotate_size") {
        let raw = expect_int("logrotate_size", value)?;
        config.logrotate_size = u64::try_from(raw).map_err(|_| {
            ConfigError::invalid(
                "logrotate_size",
                format!("rotation threshold must be a positive byte count, got {raw}"),
            )
        })?;
    }

    validate(&config)?;
    Ok(config)
}

/// Parse TOML text and build a validated [`ConfigStore`] from it.
pub fn load_str(content: &str) -> Result<ConfigStore, ConfigError> {
    let source: Value = content
        .parse()
        .map_err(|e: toml::de::Error| ConfigError::UnreadableSource(e.to_string()))?;
    load(&source)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ConfigStore, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = load_str(&content)?;
    tracing::info!(path = %path.display(), "configuration loaded");
    Ok(config)
}

impl ConfigStore {
    /// Convenience alias for [`load`].
    pub fn load(source: &Value) -> Result<Self, ConfigError> {
        load(source)
    }
}

fn expect_bool(field: &'static str, value: &Value) -> Result<bool, ConfigError> {
    value.as_bool().ok_or_else(|| type_mismatch(field, "boolean", value))
}

fn expect_int(field: &'static str, value: &Value) -> Result<i64, ConfigError> {
    value.as_integer().ok_or_else(|| type_mismatch(field, "integer", value))
}

fn expect_str<'a>(field: &'static str, value: &'a Value) -> Result<&'a str, ConfigError> {
    value.as_str().ok_or_else(|| type_mismatch(field, "string", value))
}

fn type_mismatch(field: &'static str, expected: &str, value: &Value) -> ConfigError {
    ConfigError::invalid(
        field,
        format!("expected {expected}, found {}", value.type_str()),
    )
}

fn extract_endpoint(value: &Value) -> Result<LockEndpoint, ConfigError> {
    let table = value
        .as_table()
        .ok_or_else(|| type_mismatch("redis", "table with host and port", value))?;

    let mut endpoint = LockEndpoint::default();
    if let Some(host) = table.get("host") {
        endpoint.host = expect_str("redis", host)?.to_string();
    }
    if let Some(port) = table.get("port") {
        let raw = expect_int("redis", port)?;
        endpoint.port = u16::try_from(raw).map_err(|_| {
            ConfigError::invalid("redis", format!("port {raw} is out of range"))
        })?;
    }
    Ok(endpoint)
}
