//! Exit codes for the wpcheck CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing:
//! - 0-1: success outcomes (1 means placeholder advisories were reported)
//! - 10-14: configuration errors, mirroring the library error codes
//! - 20: internal errors (bugs, should be reported)

use wpcheck_config::ConfigError;

/// Exit codes for wpcheck operations.
///
/// These codes are a stable contract for automation. Changes require a
/// major version bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success: configuration loaded (and validated) cleanly.
    Clean = 0,

    /// Loaded fine, but placeholder secrets were reported.
    Advisories = 1,

    /// The source could not be found or read.
    SourceError = 10,

    /// The source could not be parsed.
    ParseError = 11,

    /// A required key is missing.
    MissingKey = 12,

    /// The base path is not a readable directory.
    PathError = 13,

    /// A value violates an invariant.
    ValueError = 14,

    /// Internal error.
    Internal = 20,
}

impl ExitCode {
    /// The process exit status for this outcome.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::UnreadableSource { .. } => ExitCode::SourceError,
            ConfigError::ParseFailed { .. } => ExitCode::ParseError,
            ConfigError::MissingRequiredKey { .. } => ExitCode::MissingKey,
            ConfigError::InvalidPath { .. } => ExitCode::PathError,
            ConfigError::InvalidValue { .. } => ExitCode::ValueError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes_mirror_error_codes() {
        let err = ConfigError::MissingRequiredKey { key: "DB_NAME" };
        assert_eq!(ExitCode::from(&err).as_i32(), err.code() as i32);

        let err = ConfigError::InvalidPath {
            path: PathBuf::from("/x"),
            reason: "not a directory".to_string(),
        };
        assert_eq!(ExitCode::from(&err).as_i32(), err.code() as i32);
    }

    #[test]
    fn test_success_codes() {
        assert_eq!(ExitCode::Clean.as_i32(), 0);
        assert_eq!(ExitCode::Advisories.as_i32(), 1);
    }
}
