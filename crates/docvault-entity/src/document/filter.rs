//! Document listing filter.

use docvault_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use super::model::Document;

/// Columns the single equality clause may target.
pub const FILTERABLE_KEYS: &[&str] = &["name", "mime", "public", "file"];

/// Query parameters for listing documents. Never persisted.
///
/// The `login` is informational input only: the catalog overwrites it
/// with the authenticated owner's login before the filter reaches a
/// ledger, preventing cross-owner enumeration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentFilter {
    /// Owner login the listing is scoped to.
    #[serde(default)]
    pub login: String,
    /// Field name for an optional single equality clause.
    #[serde(default)]
    pub key: Option<String>,
    /// Value for the equality clause.
    #[serde(default)]
    pub value: Option<String>,
    /// Maximum number of results; non-positive means unlimited.
    #[serde(default)]
    pub limit: i64,
}

impl DocumentFilter {
    /// The validated equality clause, if both key and value are set.
    ///
    /// Fails with `FindFailed` when the key is not filterable, so a
    /// caller-supplied column name can never reach a query builder.
    pub fn equality_clause(&self) -> AppResult<Option<(&str, &str)>> {
        match (self.key.as_deref(), self.value.as_deref()) {
            (Some(key), Some(value)) => {
                if !FILTERABLE_KEYS.contains(&key) {
                    return Err(AppError::new(
                        docvault_core::ErrorKind::FindFailed,
                        format!("'{key}' is not a filterable document field"),
                    ));
                }
                Ok(Some((key, value)))
            }
            _ => Ok(None),
        }
    }

    /// Whether the document satisfies the equality clause (grant scoping
    /// is applied separately). Used by the in-memory ledger.
    pub fn matches(&self, document: &Document) -> bool {
        match (self.key.as_deref(), self.value.as_deref()) {
            (Some("name"), Some(value)) => document.name == value,
            (Some("mime"), Some(value)) => document.mime == value,
            (Some("public"), Some(value)) => document.public.to_string() == value,
            (Some("file"), Some(value)) => document.is_file.to_string() == value,
            _ => true,
        }
    }
}
