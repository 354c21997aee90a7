//! Access token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted bearer-token ledger entry.
///
/// Presence in the ledger is the sole source of truth for token
/// liveness. The signed token's own expiry claim is only a hint that
/// the authority checks against the wall clock.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccessToken {
    /// Unique token-record identifier.
    pub id: Uuid,
    /// The opaque signed token string.
    pub token: String,
    /// When the token was issued.
    pub issued_at: DateTime<Utc>,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
    /// The owning user.
    pub user_id: Uuid,
}
