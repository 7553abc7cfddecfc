//! Error types for configuration loading and validation.
//!
//! Every failure is fatal to the loader: no retries, no partial
//! configuration. Errors carry stable codes for machine parsing plus
//! headline/remediation strings for human-facing output. Messages never
//! contain secret values, only key names.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Unified error type for configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The source file could not be read at all.
    #[error("cannot read configuration source {path}: {source}")]
    UnreadableSource {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The source was readable but not scannable.
    #[error("parse error at line {line}: {message}")]
    ParseFailed {
        /// 1-based line number in the source.
        line: usize,
        /// What went wrong (never includes secret values).
        message: String,
    },

    /// A required constant is absent from the source.
    #[error("missing required key: {key}")]
    MissingRequiredKey {
        /// Canonical constant name, e.g. `DB_NAME` or `AUTH_SALT`.
        key: &'static str,
    },

    /// The base path does not resolve to an existing readable directory.
    #[error("invalid base path {path}: {reason}")]
    InvalidPath {
        /// The resolved candidate path.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// A key is present but its value violates an invariant.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Key or field name.
        key: String,
        /// What the invariant requires.
        message: String,
    },
}

impl ConfigError {
    /// Stable error code for structured reporting.
    ///
    /// Codes are a contract for automation; changes require a major bump.
    pub fn code(&self) -> u32 {
        match self {
            ConfigError::UnreadableSource { .. } => 10,
            ConfigError::ParseFailed { .. } => 11,
            ConfigError::MissingRequiredKey { .. } => 12,
            ConfigError::InvalidPath { .. } => 13,
            ConfigError::InvalidValue { .. } => 14,
        }
    }

    /// Whether the error is potentially recoverable by user action.
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Wrong path or permissions; the user can point elsewhere.
            ConfigError::UnreadableSource { .. } => true,
            // Fixable by editing the source.
            ConfigError::ParseFailed { .. } => true,
            ConfigError::MissingRequiredKey { .. } => true,
            ConfigError::InvalidPath { .. } => true,
            ConfigError::InvalidValue { .. } => true,
        }
    }

    /// Short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            ConfigError::UnreadableSource { .. } => "Unreadable Configuration Source",
            ConfigError::ParseFailed { .. } => "Configuration Parse Error",
            ConfigError::MissingRequiredKey { .. } => "Missing Required Key",
            ConfigError::InvalidPath { .. } => "Invalid Base Path",
            ConfigError::InvalidValue { .. } => "Invalid Configuration Value",
        }
    }

    /// Human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            ConfigError::UnreadableSource { .. } => {
                "Check that the path exists and is readable, or pass an explicit path to 'wpcheck check <PATH>'."
            }
            ConfigError::ParseFailed { .. } => {
                "Fix the reported line. Only define('KEY', <string|bool>), $table_prefix, and the ABSPATH bootstrap forms are recognized."
            }
            ConfigError::MissingRequiredKey { .. } => {
                "Add the missing define() to the source. DB_NAME, DB_USER, DB_HOST and all eight keys/salts are required."
            }
            ConfigError::InvalidPath { .. } => {
                "ABSPATH must name an existing, readable directory. Check the path and filesystem permissions."
            }
            ConfigError::InvalidValue { .. } => {
                "Correct the reported key. Run 'wpcheck check --strict' to see all production requirements."
            }
        }
    }
}

/// Format an error for human-readable stderr output.
///
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &ConfigError, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}
