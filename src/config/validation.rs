//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (the loader handles type coercion)
//! - Validate value ranges (rotation threshold > 0)
//! - Check the one cross-field coupling: a lock endpoint with port 0
//!   selects a Unix socket, so its host must name the socket path
//!
//! # Design Decisions
//! - Validation is a pure function: `&ConfigStore -> Result<(), ConfigError>`
//! - Runs after extraction, before the store is released to callers
//! - A zero rotation threshold is rejected rather than treated as
//!   "never rotate"; silently unbounded logs are worse than a hard error

use crate::config::loader::ConfigError;
use crate::config::schema::ConfigStore;

/// Check the semantic invariants of an extracted configuration.
pub fn validate(config: &ConfigStore) -> Result<(), ConfigError> {
    if config.logrotate_size == 0 {
        return Err(ConfigError::invalid(
            "logrotate_size",
            "rotation threshold must be greater than zero",
        ));
    }

    if config.locking_endpoint.is_unix_socket() && config.locking_endpoint.host.is_empty() {
        return Err(ConfigError::invalid(
            "redis",
            "port 0 selects a unix socket, so host must be a socket path",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LockEndpoint;

    #[test]
    fn test_default_config_passes() {
        assert!(validate(&ConfigStore::default()).is_ok());
    }

    #[test]
    fn test_zero_rotate_size_rejected() {
        let mut config = ConfigStore::default();
        config.logrotate_size = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidField {
                field: "logrotate_size",
                ..
            })
        ));
    }

    #[test]
    fn test_socket_endpoint_needs_host() {
        let mut config = ConfigStore::default();
        config.locking_endpoint = LockEndpoint {
            host: String::new(),
            port: 0,
        };
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidField { field: "redis", .. })
        ));

        config.locking_endpoint.host = "/run/redis.sock".to_string();
        assert!(validate(&config).is_ok());
    }
}
