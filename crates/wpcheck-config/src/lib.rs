//! WordPress-style configuration loading and validation.
//!
//! This crate provides:
//! - A typed, immutable [`ConfigurationSet`] with redaction-safe secrets
//! - A scanner for the `wp-config.php` `define()` subset
//! - One-shot loading with defaults and required-key enforcement
//! - Production semantic validation
//! - Source resolution (CLI → env → XDG → system)
//! - Config snapshots for audit and drift detection

pub mod error;
pub mod loader;
pub mod model;
pub mod parse;
pub mod resolve;
pub mod secret;
pub mod snapshot;
pub mod validate;

pub use error::{ConfigError, Result};
pub use loader::{load, load_from_str};
pub use model::{AuthKeys, ConfigurationSet, DatabaseSettings};
pub use resolve::{resolve_source, ConfigSource, ResolvedSource};
pub use secret::Secret;
pub use snapshot::ConfigSnapshot;
pub use validate::{placeholder_secrets, validate_production};

/// Schema version for snapshot files.
pub const SNAPSHOT_SCHEMA_VERSION: &str = "1.0.0";
