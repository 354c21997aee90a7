//! Blob store trait for owner-scoped binary payloads.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use crate::result::AppResult;

/// Owner-scoped binary storage keyed by (owner id, document name).
///
/// Storage is partitioned per owner so cross-owner path collisions are
/// impossible. The trait is defined here in `docvault-core` and
/// implemented in `docvault-storage`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Write a blob, creating the owner's partition if absent.
    async fn save(&self, owner_id: Uuid, name: &str, data: Bytes) -> AppResult<()>;

    /// Resolve the path a blob lives at (whether or not it exists).
    fn locate(&self, owner_id: Uuid, name: &str) -> PathBuf;

    /// Check whether a blob exists for the given owner and name.
    async fn exists(&self, owner_id: Uuid, name: &str) -> AppResult<bool>;

    /// Delete a blob. Deleting a non-existent blob is a hard failure;
    /// callers wanting idempotency must pre-check with [`Self::exists`].
    async fn delete(&self, owner_id: Uuid, name: &str) -> AppResult<()>;
}
