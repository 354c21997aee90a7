//! Ledger trait seams consumed by the auth and document services.
//!
//! Services depend on these traits only; the backend (PostgreSQL or
//! in-memory) is chosen at wiring time. Lookups return `Ok(None)` for
//! absence — mapping absence to a domain error is the caller's job.

use async_trait::async_trait;
use uuid::Uuid;

use docvault_core::result::AppResult;
use docvault_entity::document::{Document, DocumentFilter};
use docvault_entity::token::AccessToken;
use docvault_entity::user::User;

/// Authoritative user record set.
#[async_trait]
pub trait UserLedger: Send + Sync + 'static {
    /// Persist a new user. Fails with `InsertFailed` on a duplicate login.
    async fn create_user(&self, user: &User) -> AppResult<()>;

    /// Find a user by login.
    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>>;

    /// Find a user by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
}

/// Authoritative bearer-token record set.
#[async_trait]
pub trait TokenLedger: Send + Sync + 'static {
    /// Persist a newly issued token.
    async fn create_token(&self, token: &AccessToken) -> AppResult<()>;

    /// Find a ledger entry by the raw token string.
    async fn find_token(&self, token: &str) -> AppResult<Option<AccessToken>>;

    /// Delete the ledger entry for a token string.
    ///
    /// Deleting an absent token succeeds, so concurrent expiry-triggered
    /// revocation and explicit logout cannot fail each other.
    async fn delete_token(&self, token: &str) -> AppResult<()>;
}

/// Authoritative document metadata store.
///
/// Every scoped operation takes the caller's login and matches only
/// documents whose grant list contains it.
#[async_trait]
pub trait DocumentLedger: Send + Sync + 'static {
    /// Insert a new metadata row.
    async fn insert(&self, document: &Document) -> AppResult<()>;

    /// Find a document by id within the login's grant set.
    async fn find_by_id(&self, login: &str, id: Uuid) -> AppResult<Option<Document>>;

    /// Find a document by name within the login's grant set.
    async fn find_by_name(&self, login: &str, name: &str) -> AppResult<Option<Document>>;

    /// List documents granted to `filter.login`, applying the filter's
    /// optional equality clause, sorted by name descending then creation
    /// time descending, capped at `filter.limit` when positive.
    async fn list(&self, filter: &DocumentFilter) -> AppResult<Vec<Document>>;

    /// Delete a document by id within the login's grant set.
    async fn delete(&self, login: &str, id: Uuid) -> AppResult<()>;
}
