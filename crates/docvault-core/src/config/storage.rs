//! Blob storage configuration.

use serde::{Deserialize, Serialize};

/// Local blob store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory under which per-owner partitions are created.
    #[serde(default = "default_root")]
    pub root: String,
    /// Whether a document delete tolerates an already-missing blob.
    ///
    /// When `true`, the catalog pre-checks existence and skips the blob
    /// delete if nothing is stored. When `false`, the delete runs
    /// unconditionally and a missing blob aborts the whole operation,
    /// leaving the metadata row in place.
    #[serde(default = "default_tolerate_missing")]
    pub tolerate_missing_on_delete: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            tolerate_missing_on_delete: default_tolerate_missing(),
        }
    }
}

fn default_root() -> String {
    "data/blobs".to_string()
}

fn default_tolerate_missing() -> bool {
    true
}
