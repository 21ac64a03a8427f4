//! Configuration schema definitions.
//!
//! This module defines the typed configuration for the content-management
//! server. Every field has a documented default so a minimal (even empty)
//! config file resolves to a complete, valid store. Fields are private:
//! the only way to obtain a `ConfigStore` is through the loader, and the
//! only way to read it is through the accessors.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Default per-instance user cap when one-click instances are enabled.
pub const DEFAULT_USER_LIMIT: u32 = 50;

/// Default log-rotation threshold: 100 MiB.
pub const DEFAULT_LOGROTATE_SIZE: u64 = 104_857_600;

/// Default log file location.
pub const DEFAULT_LOGFILE: &str = "/var/log/cms/cms.log";

/// Supported local (in-process / per-host) cache implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalCacheBackend {
    /// Shared-memory cache local to the host (APCu-style).
    Apcu,
    /// Request-scoped in-memory array cache.
    Array,
    Memcached,
    Redis,
}

/// Supported distributed-lock cache implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LockingCacheBackend {
    Redis,
    Memcached,
}

/// Strips a class-path style namespace (`\Vendor\Memcache\APCu` or
/// `vendor/cache/redis`) down to its final segment.
fn backend_name(identifier: &str) -> &str {
    identifier.rsplit(['\\', '/']).next().unwrap_or(identifier)
}

impl LocalCacheBackend {
    /// Resolve a backend identifier as written in config files.
    ///
    /// Namespaced identifiers are accepted and matched case-insensitively
    /// on the final segment, so `"APCu"` and `"\\OC\\Memcache\\APCu"`
    /// resolve to the same backend.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        match backend_name(identifier).to_ascii_lowercase().as_str() {
            "apcu" => Some(Self::Apcu),
            "array" | "arraycache" => Some(Self::Array),
            "memcached" => Some(Self::Memcached),
            "redis" => Some(Self::Redis),
            _ => None,
        }
    }
}

impl LockingCacheBackend {
    /// Resolve a locking backend identifier. Same matching rules as
    /// [`LocalCacheBackend::from_identifier`].
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        match backend_name(identifier).to_ascii_lowercase().as_str() {
            "redis" => Some(Self::Redis),
            "memcached" => Some(Self::Memcached),
            _ => None,
        }
    }
}

/// Endpoint of the distributed-lock service.
///
/// `port == 0` means "connect to the Unix domain socket at `host`"; any
/// other port means TCP to `host:port`. The loader enforces that a port
/// of 0 never ships with an empty host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockEndpoint {
    pub host: String,
    pub port: u16,
}

impl LockEndpoint {
    /// True when this endpoint addresses a Unix domain socket rather
    /// than a TCP host/port pair.
    pub fn is_unix_socket(&self) -> bool {
        self.port == 0
    }
}

impl Default for LockEndpoint {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6379,
        }
    }
}

/// Validated, immutable configuration for the content-management server.
///
/// Constructed once at startup by the loader; read-only afterwards. All
/// accessors are pure reads of already-validated data and cannot fail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigStore {
    pub(crate) one_click_instance: bool,
    pub(crate) one_click_instance_user_limit: u32,
    pub(crate) local_cache: LocalCacheBackend,
    pub(crate) locking_cache: LockingCacheBackend,
    pub(crate) locking_endpoint: LockEndpoint,
    pub(crate) logfile: PathBuf,
    pub(crate) logrotate_size: u64,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self {
            one_click_instance: false,
            one_click_instance_user_limit: DEFAULT_USER_LIMIT,
            local_cache: LocalCacheBackend::Apcu,
            locking_cache: LockingCacheBackend::Redis,
            locking_endpoint: LockEndpoint::default(),
            logfile: PathBuf::from(DEFAULT_LOGFILE),
            logrotate_size: DEFAULT_LOGROTATE_SIZE,
        }
    }
}

impl ConfigStore {
    /// Whether one-click instance provisioning is enabled.
    pub fn one_click_instance_enabled(&self) -> bool {
        self.one_click_instance
    }

    /// Maximum users per one-click instance. Meaningful only when
    /// [`one_click_instance_enabled`](Self::one_click_instance_enabled)
    /// is true.
    pub fn one_click_instance_user_limit(&self) -> u32 {
        self.one_click_instance_user_limit
    }

    /// Selected local cache implementation.
    pub fn local_cache_backend(&self) -> LocalCacheBackend {
        self.local_cache
    }

    /// Selected distributed-lock cache implementation.
    pub fn locking_cache_backend(&self) -> LockingCacheBackend {
        self.locking_cache
    }

    /// Endpoint of the distributed-lock service.
    pub fn locking_cache_endpoint(&self) -> &LockEndpoint {
        &self.locking_endpoint
    }

    /// Path the application log is written to.
    pub fn log_file_path(&self) -> &Path {
        &self.logfile
    }

    /// Log size in bytes at which the log file is rotated.
    pub fn log_rotate_size_bytes(&self) -> u64 {
        self.logrotate_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_identifier_strips_namespace() {
        assert_eq!(
            LocalCacheBackend::from_identifier("\\OC\\Memcache\\APCu"),
            Some(LocalCacheBackend::Apcu)
        );
        assert_eq!(
            LocalCacheBackend::from_identifier("APCu"),
            Some(LocalCacheBackend::Apcu)
        );
        assert_eq!(
            LockingCacheBackend::from_identifier("\\OC\\Memcache\\Redis"),
            Some(LockingCacheBackend::Redis)
        );
    }

    #[test]
    fn test_backend_identifier_case_insensitive() {
        assert_eq!(
            LocalCacheBackend::from_identifier("REDIS"),
            Some(LocalCacheBackend::Redis)
        );
        assert_eq!(
            LocalCacheBackend::from_identifier("arraycache"),
            Some(LocalCacheBackend::Array)
        );
    }

    #[test]
    fn test_unknown_backend_identifier() {
        assert_eq!(LocalCacheBackend::from_identifier("varnish"), None);
        assert_eq!(LockingCacheBackend::from_identifier("apcu"), None);
        assert_eq!(LocalCacheBackend::from_identifier(""), None);
    }

    #[test]
    fn test_default_store_is_valid() {
        let config = ConfigStore::default();
        assert!(!config.one_click_instance_enabled());
        assert_eq!(config.one_click_instance_user_limit(), DEFAULT_USER_LIMIT);
        assert_eq!(config.local_cache_backend(), LocalCacheBackend::Apcu);
        assert_eq!(config.locking_cache_backend(), LockingCacheBackend::Redis);
        assert!(!config.locking_cache_endpoint().is_unix_socket());
        assert_eq!(config.log_rotate_size_bytes(), DEFAULT_LOGROTATE_SIZE);
    }

    #[test]
    fn test_unix_socket_endpoint() {
        let endpoint = LockEndpoint {
            host: "/var/run/redis/redis.sock".to_string(),
            port: 0,
        };
        assert!(endpoint.is_unix_socket());
    }
}
