//! The typed, immutable configuration model.

use std::path::PathBuf;

use serde::Serialize;

use crate::secret::Secret;

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseSettings {
    /// Database name (`DB_NAME`).
    pub name: String,
    /// Database user (`DB_USER`).
    pub user: String,
    /// Database password (`DB_PASSWORD`). Optional at load time; production
    /// validation requires it non-empty.
    pub password: Secret,
    /// Database host (`DB_HOST`).
    pub host: String,
    /// Character set (`DB_CHARSET`), defaulting to `utf8`.
    pub charset: String,
    /// Collation (`DB_COLLATE`); empty leaves it to the server default.
    pub collation: String,
}

/// The eight authentication keys and salts.
///
/// All are secrets: they never appear in `Debug`, logs, or serialized
/// output. Use [`AuthKeys::iter`] for validation and fingerprinting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthKeys {
    /// `AUTH_KEY`
    pub auth_key: Secret,
    /// `SECURE_AUTH_KEY`
    pub secure_auth_key: Secret,
    /// `LOGGED_IN_KEY`
    pub logged_in_key: Secret,
    /// `NONCE_KEY`
    pub nonce_key: Secret,
    /// `AUTH_SALT`
    pub auth_salt: Secret,
    /// `SECURE_AUTH_SALT`
    pub secure_auth_salt: Secret,
    /// `LOGGED_IN_SALT`
    pub logged_in_salt: Secret,
    /// `NONCE_SALT`
    pub nonce_salt: Secret,
}

impl AuthKeys {
    /// Constant-name / value pairs in canonical source order.
    pub fn iter(&self) -> [(&'static str, &Secret); 8] {
        [
            ("AUTH_KEY", &self.auth_key),
            ("SECURE_AUTH_KEY", &self.secure_auth_key),
            ("LOGGED_IN_KEY", &self.logged_in_key),
            ("NONCE_KEY", &self.nonce_key),
            ("AUTH_SALT", &self.auth_salt),
            ("SECURE_AUTH_SALT", &self.secure_auth_salt),
            ("LOGGED_IN_SALT", &self.logged_in_salt),
            ("NONCE_SALT", &self.nonce_salt),
        ]
    }
}

/// The immutable result of loading a configuration source.
///
/// Constructed once by [`crate::loader::load`], never mutated, and safe to
/// share read-only with any number of consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationSet {
    /// Database connection settings.
    pub database: DatabaseSettings,
    /// Authentication keys and salts.
    pub keys: AuthKeys,
    /// Identifier-safe prefix prepended to logical table names.
    pub table_prefix: String,
    /// Debug flag (`WP_DEBUG`), defaulting to `false`.
    pub debug_mode: bool,
    /// Installation base directory (`ABSPATH`), verified to exist and be
    /// readable at load time.
    pub base_path: PathBuf,
    /// Trailing bootstrap entry (`require_once ABSPATH . '...'`), recorded
    /// verbatim. Its contract is unknown; it is never interpreted here.
    pub bootstrap: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConfigurationSet {
        ConfigurationSet {
            database: DatabaseSettings {
                name: "db".to_string(),
                user: "u".to_string(),
                password: Secret::new("pw"),
                host: "localhost".to_string(),
                charset: "utf8".to_string(),
                collation: String::new(),
            },
            keys: AuthKeys {
                auth_key: Secret::new("k1"),
                secure_auth_key: Secret::new("k2"),
                logged_in_key: Secret::new("k3"),
                nonce_key: Secret::new("k4"),
                auth_salt: Secret::new("s1"),
                secure_auth_salt: Secret::new("s2"),
                logged_in_salt: Secret::new("s3"),
                nonce_salt: Secret::new("s4"),
            },
            table_prefix: "wp_".to_string(),
            debug_mode: false,
            base_path: PathBuf::from("/tmp"),
            bootstrap: Some("wp-settings.php".to_string()),
        }
    }

    #[test]
    fn test_auth_keys_iter_order() {
        let cfg = sample();
        let names: Vec<&str> = cfg.keys.iter().iter().map(|(n, _)| *n).collect();
        assert_eq!(names[0], "AUTH_KEY");
        assert_eq!(names[7], "NONCE_SALT");
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let cfg = sample();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("pw"));
        assert!(!debug.contains("k1"));
        assert!(!debug.contains("s4"));
    }

    #[test]
    fn test_serialized_output_redacts_secrets() {
        let cfg = sample();
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(!json.contains("\"pw\""));
        assert!(!json.contains("\"s1\""));
        assert!(json.contains("\"db\""));
    }
}
