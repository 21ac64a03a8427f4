//! Validated configuration loading for a content-management server.
//!
//! The deployment ships a loosely-typed key-value config file; this crate
//! defines the schema, performs one validated coercion pass at load time,
//! and hands consumers an immutable [`ConfigStore`]. Load either fully
//! succeeds or fully fails; accessors on a loaded store cannot fail.

pub mod config;

pub use config::loader::{load, load_config, load_str, ConfigError};
pub use config::schema::ConfigStore;
pub use config::schema::{LocalCacheBackend, LockEndpoint, LockingCacheBackend};
