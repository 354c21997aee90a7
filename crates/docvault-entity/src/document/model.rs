//! Document entity model.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored document's metadata record.
///
/// A document carries at most one of an inline JSON payload or a
/// referenced blob; `is_file == true` implies a blob exists in the
/// blob store under (owner id, name).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier.
    #[serde(skip_serializing)]
    pub id: Uuid,
    /// Document name, unique within the owner's grant set.
    pub name: String,
    /// MIME type of the payload.
    pub mime: String,
    /// Whether a blob backs this document.
    #[sqlx(rename = "is_file")]
    #[serde(rename = "file")]
    pub is_file: bool,
    /// Whether the document is publicly readable.
    pub public: bool,
    /// When the document was created.
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
    /// Login names allowed to read and delete this document. The
    /// owner's login is always included.
    #[sqlx(rename = "grant_logins")]
    pub grant: Vec<String>,
    /// Inline JSON payload, if the document is not blob-backed.
    pub json: Option<serde_json::Value>,
}

impl Document {
    /// Whether the given login may read or delete this document.
    pub fn is_granted(&self, login: &str) -> bool {
        self.grant.iter().any(|g| g == login)
    }
}

/// The payload supplied on document creation.
///
/// Modeled as an enum so a document can never carry both an inline
/// JSON body and a blob.
#[derive(Debug, Clone)]
pub enum DocumentPayload {
    /// An inline JSON body.
    Inline(serde_json::Value),
    /// An uploaded binary blob.
    Blob(Bytes),
}

/// Data required to create a new document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDocument {
    /// Document name.
    pub name: String,
    /// MIME type of the payload.
    pub mime: String,
    /// Whether the document is publicly readable.
    pub public: bool,
    /// Additional logins granted read/delete access.
    #[serde(default)]
    pub grant: Vec<String>,
}
