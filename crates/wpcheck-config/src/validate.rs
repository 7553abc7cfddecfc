//! Semantic validation beyond what the loader enforces.
//!
//! The loader guarantees presence and shape; this module checks the
//! production invariants: every key/salt non-empty and pairwise distinct,
//! no stock placeholder values, and a non-empty database password. Fixture
//! sources with placeholder secrets load fine and only fail here, so test
//! environments stay usable.

use crate::error::{ConfigError, Result};
use crate::model::ConfigurationSet;

/// The stock placeholder WordPress ships in its sample configuration.
pub const STOCK_PLACEHOLDER: &str = "put your unique phrase here";

/// Validate the production invariants of a loaded configuration.
///
/// Fails with [`ConfigError::InvalidValue`] on the first violation. Error
/// messages name fields only; secret values are never included.
pub fn validate_production(config: &ConfigurationSet) -> Result<()> {
    if config.database.password.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "DB_PASSWORD".to_string(),
            message: "must not be empty in production".to_string(),
        });
    }

    let entries = config.keys.iter();

    for (name, secret) in &entries {
        if secret.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: (*name).to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if secret.expose() == STOCK_PLACEHOLDER {
            return Err(ConfigError::InvalidValue {
                key: (*name).to_string(),
                message: "is the stock placeholder; generate a unique value".to_string(),
            });
        }
    }

    for (i, (name_a, secret_a)) in entries.iter().enumerate() {
        for (name_b, secret_b) in &entries[i + 1..] {
            if secret_a == secret_b {
                return Err(ConfigError::InvalidValue {
                    key: format!("{name_a} / {name_b}"),
                    message: "keys and salts must be pairwise distinct".to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Names of key/salt fields whose values look like fixture placeholders.
///
/// Advisory only: placeholder secrets are acceptable in test contexts, so
/// this never errors. Callers surface the result as warnings.
pub fn placeholder_secrets(config: &ConfigurationSet) -> Vec<&'static str> {
    config
        .keys
        .iter()
        .iter()
        .filter(|(_, secret)| is_placeholder(secret.expose()))
        .map(|(name, _)| *name)
        .collect()
}

fn is_placeholder(value: &str) -> bool {
    value == STOCK_PLACEHOLDER || value.starts_with("test-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AuthKeys, DatabaseSettings};
    use crate::secret::Secret;
    use std::path::PathBuf;

    fn config_with_keys(values: [&str; 8], password: &str) -> ConfigurationSet {
        ConfigurationSet {
            database: DatabaseSettings {
                name: "db".to_string(),
                user: "u".to_string(),
                password: Secret::new(password),
                host: "localhost".to_string(),
                charset: "utf8".to_string(),
                collation: String::new(),
            },
            keys: AuthKeys {
                auth_key: Secret::new(values[0]),
                secure_auth_key: Secret::new(values[1]),
                logged_in_key: Secret::new(values[2]),
                nonce_key: Secret::new(values[3]),
                auth_salt: Secret::new(values[4]),
                secure_auth_salt: Secret::new(values[5]),
                logged_in_salt: Secret::new(values[6]),
                nonce_salt: Secret::new(values[7]),
            },
            table_prefix: "wp_".to_string(),
            debug_mode: false,
            base_path: PathBuf::from("/tmp"),
            bootstrap: None,
        }
    }

    const DISTINCT: [&str; 8] = ["k1", "k2", "k3", "k4", "s1", "s2", "s3", "s4"];

    #[test]
    fn test_distinct_nonempty_keys_pass() {
        let cfg = config_with_keys(DISTINCT, "pw");
        validate_production(&cfg).unwrap();
    }

    #[test]
    fn test_empty_password_rejected() {
        let cfg = config_with_keys(DISTINCT, "");
        let err = validate_production(&cfg).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "DB_PASSWORD"));
    }

    #[test]
    fn test_empty_salt_rejected() {
        let mut values = DISTINCT;
        values[4] = "";
        let err = validate_production(&config_with_keys(values, "pw")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "AUTH_SALT"));
    }

    #[test]
    fn test_stock_placeholder_rejected() {
        let mut values = DISTINCT;
        values[1] = STOCK_PLACEHOLDER;
        let err = validate_production(&config_with_keys(values, "pw")).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "SECURE_AUTH_KEY")
        );
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let mut values = DISTINCT;
        values[3] = "k1";
        let err = validate_production(&config_with_keys(values, "pw")).unwrap_err();
        match err {
            ConfigError::InvalidValue { key, .. } => {
                assert!(key.contains("AUTH_KEY"));
                assert!(key.contains("NONCE_KEY"));
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_error_never_contains_secret_value() {
        let mut values = DISTINCT;
        values[0] = "very-secret-dup";
        values[7] = "very-secret-dup";
        let err = validate_production(&config_with_keys(values, "pw")).unwrap_err();
        assert!(!err.to_string().contains("very-secret-dup"));
    }

    #[test]
    fn test_placeholder_detection_is_advisory() {
        let cfg = config_with_keys(
            [
                "test-auth-key",
                "test-secure-auth-key",
                "k3",
                "k4",
                "s1",
                "s2",
                "s3",
                "s4",
            ],
            "pw",
        );
        let placeholders = placeholder_secrets(&cfg);
        assert_eq!(placeholders, vec!["AUTH_KEY", "SECURE_AUTH_KEY"]);
        // Still loads and passes production checks: distinct and non-empty.
        validate_production(&cfg).unwrap();
    }
}
