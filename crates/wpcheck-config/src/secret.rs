//! Redaction-safe wrapper for sensitive configuration values.
//!
//! Passwords, authentication keys, and salts are wrapped in [`Secret`] so
//! that `Debug` output, logs, and serialized configuration never contain the
//! underlying value. Read access requires an explicit [`Secret::expose`].

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

/// Marker emitted wherever a secret would otherwise be printed.
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Hex characters kept from a secret fingerprint (8 bytes of SHA-256).
const FINGERPRINT_HEX_LEN: usize = 16;

/// A sensitive string that never leaks through `Debug` or serialization.
///
/// Equality compares the underlying value, so two loads of the same source
/// yield equal secrets and equal `ConfigurationSet`s.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a sensitive value.
    pub fn new(value: impl Into<String>) -> Self {
        Secret(value.into())
    }

    /// Explicit read access to the underlying value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the underlying value is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length of the underlying value in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Truncated SHA-256 of the value, safe for snapshots and diagnostics.
    ///
    /// Stable across loads of the same source; the value itself is not
    /// recoverable from the fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.0.as_bytes());
        let digest = hex::encode(hasher.finalize());
        format!("sha256:{}", &digest[..FINGERPRINT_HEX_LEN])
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Secret(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Secret(value.to_string())
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret({})", REDACTION_MARKER)
    }
}

// Serialization emits the marker, never the value. Loading is the only way
// to construct a populated ConfigurationSet, so there is no Deserialize.
impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTION_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let secret = Secret::new("hunter2");
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains(REDACTION_MARKER));
    }

    #[test]
    fn test_serialize_is_redacted() {
        let secret = Secret::new("hunter2");
        let json = serde_json::to_string(&secret).unwrap();
        assert_eq!(json, format!("\"{}\"", REDACTION_MARKER));
    }

    #[test]
    fn test_expose_returns_value() {
        let secret = Secret::new("hunter2");
        assert_eq!(secret.expose(), "hunter2");
        assert_eq!(secret.len(), 7);
        assert!(!secret.is_empty());
    }

    #[test]
    fn test_equality_compares_values() {
        assert_eq!(Secret::new("a"), Secret::new("a"));
        assert_ne!(Secret::new("a"), Secret::new("b"));
    }

    #[test]
    fn test_fingerprint_stable_and_distinct() {
        let a1 = Secret::new("value-a").fingerprint();
        let a2 = Secret::new("value-a").fingerprint();
        let b = Secret::new("value-b").fingerprint();
        assert_eq!(a1, a2);
        assert_ne!(a1, b);
        assert!(a1.starts_with("sha256:"));
        assert_eq!(a1.len(), "sha256:".len() + 16);
    }

    #[test]
    fn test_fingerprint_does_not_leak_value() {
        let secret = Secret::new("supersecretvalue");
        assert!(!secret.fingerprint().contains("supersecret"));
    }
}
