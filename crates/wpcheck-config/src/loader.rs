//! Loading a configuration source into a [`ConfigurationSet`].
//!
//! The loader is a pure one-shot read: it parses the source, enforces the
//! required-key set, applies defaults for optional keys, resolves and
//! verifies the base path, and returns an immutable value. There are no
//! side effects beyond reading the file, and loading the same source twice
//! yields equal results.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::model::{AuthKeys, ConfigurationSet, DatabaseSettings};
use crate::parse::{self, RawSource, RawValue};
use crate::secret::Secret;

/// Table prefix used when the source omits `$table_prefix`.
pub const DEFAULT_TABLE_PREFIX: &str = "wp_";

/// Character set used when the source omits `DB_CHARSET`.
pub const DEFAULT_CHARSET: &str = "utf8";

/// Keys that must be present in every source.
///
/// `DB_PASSWORD` is deliberately absent: it is optional at load time and
/// only required by production validation.
pub const REQUIRED_KEYS: [&str; 11] = [
    "DB_NAME",
    "DB_USER",
    "DB_HOST",
    "AUTH_KEY",
    "SECURE_AUTH_KEY",
    "LOGGED_IN_KEY",
    "NONCE_KEY",
    "AUTH_SALT",
    "SECURE_AUTH_SALT",
    "LOGGED_IN_SALT",
    "NONCE_SALT",
];

/// Load a configuration source from disk.
///
/// `__DIR__`-relative `ABSPATH` expressions resolve against the source
/// file's parent directory.
pub fn load(source_path: &Path) -> Result<ConfigurationSet> {
    let raw_text = fs::read_to_string(source_path).map_err(|e| ConfigError::UnreadableSource {
        path: source_path.to_path_buf(),
        source: e,
    })?;

    let origin_dir = source_path.parent().unwrap_or_else(|| Path::new("."));
    load_from_str(&raw_text, origin_dir)
}

/// Load a configuration source from an in-memory string.
///
/// `origin_dir` anchors `__DIR__`-relative `ABSPATH` expressions and is the
/// fallback base path when the source omits `ABSPATH` entirely.
pub fn load_from_str(source: &str, origin_dir: &Path) -> Result<ConfigurationSet> {
    let raw = parse::scan(source)?;

    for key in REQUIRED_KEYS {
        if !raw.defines.contains_key(key) {
            return Err(ConfigError::MissingRequiredKey { key });
        }
    }

    let database = DatabaseSettings {
        name: required_str(&raw, "DB_NAME")?,
        user: required_str(&raw, "DB_USER")?,
        password: Secret::new(optional_str(&raw, "DB_PASSWORD", "")?),
        host: required_str(&raw, "DB_HOST")?,
        charset: optional_str(&raw, "DB_CHARSET", DEFAULT_CHARSET)?,
        collation: optional_str(&raw, "DB_COLLATE", "")?,
    };

    let keys = AuthKeys {
        auth_key: required_secret(&raw, "AUTH_KEY")?,
        secure_auth_key: required_secret(&raw, "SECURE_AUTH_KEY")?,
        logged_in_key: required_secret(&raw, "LOGGED_IN_KEY")?,
        nonce_key: required_secret(&raw, "NONCE_KEY")?,
        auth_salt: required_secret(&raw, "AUTH_SALT")?,
        secure_auth_salt: required_secret(&raw, "SECURE_AUTH_SALT")?,
        logged_in_salt: required_secret(&raw, "LOGGED_IN_SALT")?,
        nonce_salt: required_secret(&raw, "NONCE_SALT")?,
    };

    let table_prefix = raw
        .table_prefix
        .clone()
        .unwrap_or_else(|| DEFAULT_TABLE_PREFIX.to_string());
    check_table_prefix(&table_prefix)?;

    let debug_mode = match raw.defines.get("WP_DEBUG") {
        None => false,
        Some(RawValue::Bool(flag)) => *flag,
        Some(_) => {
            return Err(ConfigError::InvalidValue {
                key: "WP_DEBUG".to_string(),
                message: "must be a bare true/false literal".to_string(),
            })
        }
    };

    let base_path = resolve_base_path(raw.defines.get("ABSPATH"), origin_dir)?;

    Ok(ConfigurationSet {
        database,
        keys,
        table_prefix,
        debug_mode,
        base_path,
        bootstrap: raw.bootstrap,
    })
}

/// Fetch a required key that must be a string literal.
fn required_str(raw: &RawSource, key: &'static str) -> Result<String> {
    match raw.defines.get(key) {
        Some(RawValue::Str(s)) => Ok(s.clone()),
        Some(_) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "must be a string literal".to_string(),
        }),
        // Presence was already enforced; this is unreachable in practice.
        None => Err(ConfigError::MissingRequiredKey { key }),
    }
}

/// Fetch an optional string key, applying a default when absent.
fn optional_str(raw: &RawSource, key: &str, default: &str) -> Result<String> {
    match raw.defines.get(key) {
        None => Ok(default.to_string()),
        Some(RawValue::Str(s)) => Ok(s.clone()),
        Some(_) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "must be a string literal".to_string(),
        }),
    }
}

fn required_secret(raw: &RawSource, key: &'static str) -> Result<Secret> {
    required_str(raw, key).map(Secret::new)
}

/// Table prefixes must be identifier-safe: ASCII alphanumerics and
/// underscores only, never empty or whitespace.
fn check_table_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "table_prefix".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    if !prefix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ConfigError::InvalidValue {
            key: "table_prefix".to_string(),
            message: "must contain only ASCII letters, digits, and underscores".to_string(),
        });
    }
    Ok(())
}

/// Resolve `ABSPATH` to a verified base directory.
///
/// Absent `ABSPATH` defaults to the source file's own directory, mirroring
/// the `__DIR__ . '/'` convention of the sample source.
fn resolve_base_path(value: Option<&RawValue>, origin_dir: &Path) -> Result<PathBuf> {
    let candidate = match value {
        None => origin_dir.to_path_buf(),
        Some(RawValue::DirRelative(suffix)) => {
            // Path::join would treat an absolute suffix as a replacement.
            let suffix = suffix.trim_start_matches('/');
            if suffix.is_empty() {
                origin_dir.to_path_buf()
            } else {
                origin_dir.join(suffix)
            }
        }
        Some(RawValue::Str(s)) => PathBuf::from(s),
        Some(RawValue::Bool(_)) => {
            return Err(ConfigError::InvalidValue {
                key: "ABSPATH".to_string(),
                message: "must be a path, not a boolean".to_string(),
            })
        }
    };

    let metadata = fs::metadata(&candidate).map_err(|e| ConfigError::InvalidPath {
        path: candidate.clone(),
        reason: format!("cannot resolve: {e}"),
    })?;
    if !metadata.is_dir() {
        return Err(ConfigError::InvalidPath {
            path: candidate,
            reason: "not a directory".to_string(),
        });
    }
    fs::read_dir(&candidate).map_err(|e| ConfigError::InvalidPath {
        path: candidate.clone(),
        reason: format!("not readable: {e}"),
    })?;

    Ok(candidate)
}
