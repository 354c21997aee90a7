//! Cache key builders for all DocVault cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses. Keys are colon-joined
//! segments under a common prefix.

use uuid::Uuid;

/// Prefix applied to all DocVault cache keys.
const PREFIX: &str = "docvault";

/// Cache key for a document scoped to its owner.
pub fn document(owner_id: Uuid, document_id: Uuid) -> String {
    format!("{PREFIX}:doc:{owner_id}:{document_id}")
}
