//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse, extract recognized keys, coerce types)
//!     → validation.rs (semantic checks)
//!     → ConfigStore (validated, immutable)
//!     → read-only accessors, shared freely by consumers
//! ```
//!
//! # Design Decisions
//! - The store is built exactly once at startup and never mutated;
//!   consumers hold it (or a clone) for the life of the process
//! - All fields have defaults to allow minimal configs
//! - Unknown keys are ignored so deployments can carry extra settings
//!   for other components
//! - Validation separates syntactic (coercion) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, load_config, load_str, ConfigError};
pub use schema::{
    ConfigStore, LocalCacheBackend, LockEndpoint, LockingCacheBackend,
};
