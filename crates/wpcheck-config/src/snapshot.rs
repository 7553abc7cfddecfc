//! Configuration snapshots for audit and reproducibility.
//!
//! A snapshot freezes what was loaded, from where, and a content hash of
//! the raw source, so later runs can detect drift. Secrets appear only as
//! fingerprints; the summary is safe to log and serialize.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::model::ConfigurationSet;

/// A frozen snapshot of a loaded configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// When this snapshot was taken.
    pub timestamp: DateTime<Utc>,

    /// Hostname where the snapshot was taken.
    #[serde(default)]
    pub hostname: Option<String>,

    /// Snapshot schema version.
    pub schema_version: String,

    /// Path the configuration was loaded from.
    pub source_path: String,

    /// SHA-256 hash of the raw source text.
    pub source_hash: String,

    /// Redacted summary of the loaded values.
    pub summary: ConfigSummary,
}

/// Redacted summary of key configuration values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSummary {
    /// Database name.
    pub database_name: String,

    /// Database host.
    pub database_host: String,

    /// Character set.
    pub charset: String,

    /// Collation (empty means server default).
    pub collation: String,

    /// Table prefix.
    pub table_prefix: String,

    /// Debug flag.
    pub debug_mode: bool,

    /// Verified base directory.
    pub base_path: String,

    /// Opaque bootstrap entry, if the source declared one.
    #[serde(default)]
    pub bootstrap: Option<String>,

    /// Truncated SHA-256 fingerprints of each key/salt, by constant name.
    /// Values are never recoverable from these.
    pub secret_fingerprints: BTreeMap<String, String>,
}

impl ConfigSnapshot {
    /// Create a snapshot from a loaded configuration and its raw source.
    pub fn new(config: &ConfigurationSet, source_path: &Path, raw_source: &str) -> Self {
        let hostname = hostname::get()
            .ok()
            .map(|h| h.to_string_lossy().to_string());

        let mut secret_fingerprints = BTreeMap::new();
        for (name, secret) in config.keys.iter() {
            secret_fingerprints.insert(name.to_string(), secret.fingerprint());
        }

        ConfigSnapshot {
            timestamp: Utc::now(),
            hostname,
            schema_version: crate::SNAPSHOT_SCHEMA_VERSION.to_string(),
            source_path: source_path.display().to_string(),
            source_hash: hash_content(raw_source),
            summary: ConfigSummary {
                database_name: config.database.name.clone(),
                database_host: config.database.host.clone(),
                charset: config.database.charset.clone(),
                collation: config.database.collation.clone(),
                table_prefix: config.table_prefix.clone(),
                debug_mode: config.debug_mode,
                base_path: config.base_path.display().to_string(),
                bootstrap: config.bootstrap.clone(),
                secret_fingerprints,
            },
        }
    }

    /// Serialize snapshot to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether another snapshot was taken from identical source content.
    pub fn matches(&self, other: &ConfigSnapshot) -> bool {
        self.source_hash == other.source_hash
    }

    /// Short identifier for this snapshot (first 12 chars of the hash).
    pub fn short_id(&self) -> &str {
        &self.source_hash[..12.min(self.source_hash.len())]
    }
}

/// Hash content with SHA-256 and return the hex digest.
fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
