//! Configuration source resolution and path discovery.
//!
//! Resolution order: CLI argument → environment variables → XDG path →
//! system path.

use std::path::{Path, PathBuf};

/// The discovered configuration source.
#[derive(Debug, Clone, Default)]
pub struct ResolvedSource {
    /// Path to the configuration source (or None if not found).
    pub path: Option<PathBuf>,

    /// Where the source was found (for diagnostics).
    pub source: ConfigSource,
}

/// Where a configuration source was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/wpcheck/.
    SystemConfig,

    /// No source found anywhere.
    #[default]
    NotFound,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::NotFound => write!(f, "not found"),
        }
    }
}

/// Environment variable naming a source file directly.
pub const ENV_CONFIG_PATH: &str = "WPCHECK_CONFIG";

/// Environment variable naming a directory containing the source file.
pub const ENV_CONFIG_DIR: &str = "WPCHECK_CONFIG_DIR";

/// Standard configuration file name.
pub const CONFIG_FILENAME: &str = "wp-config.php";

/// Application name for XDG and system directories.
const APP_NAME: &str = "wpcheck";

/// Resolve the configuration source using the standard resolution order.
///
/// 1. Explicit CLI path (if provided and existing)
/// 2. `WPCHECK_CONFIG` environment variable (direct path)
/// 3. `WPCHECK_CONFIG_DIR` environment variable + `wp-config.php`
/// 4. XDG config directory (`~/.config/wpcheck/wp-config.php`)
/// 5. System config (`/etc/wpcheck/wp-config.php`)
/// 6. Not found (None)
pub fn resolve_source(cli_path: Option<&Path>) -> ResolvedSource {
    let mut resolved = ResolvedSource::default();

    if let Some(path) = cli_path {
        if path.exists() {
            resolved.source = ConfigSource::CliArgument;
            resolved.path = Some(path.to_path_buf());
            return resolved;
        }
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            resolved.source = ConfigSource::Environment;
            resolved.path = Some(path);
            return resolved;
        }
    }

    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(CONFIG_FILENAME);
        if path.exists() {
            resolved.source = ConfigSource::Environment;
            resolved.path = Some(path);
            return resolved;
        }
    }

    if let Some(xdg_config) = dirs::config_dir() {
        let path = xdg_config.join(APP_NAME).join(CONFIG_FILENAME);
        if path.exists() {
            resolved.source = ConfigSource::XdgConfig;
            resolved.path = Some(path);
            return resolved;
        }
    }

    let system_path = system_config_dir().join(CONFIG_FILENAME);
    if system_path.exists() {
        resolved.source = ConfigSource::SystemConfig;
        resolved.path = Some(system_path);
        return resolved;
    }

    resolved
}

/// Get the XDG config directory for wpcheck.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the system config directory.
pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}
