//! Local filesystem blob storage.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use docvault_core::config::storage::StorageConfig;
use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_core::traits::blob::BlobStore;

/// Blob store backed by a directory tree: one subdirectory per owner,
/// one file per blob name.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Root directory for all stored blobs.
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a blob store rooted at the configured path, creating the
    /// root directory if it does not exist yet.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.root);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a blob to its path under the root. Path separators in
    /// the name are stripped so a blob can never escape its owner's
    /// directory.
    fn resolve(&self, owner_id: Uuid, name: &str) -> PathBuf {
        let clean: String = name.chars().filter(|c| !std::path::is_separator(*c)).collect();
        self.root.join(owner_id.to_string()).join(clean)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn save(&self, owner_id: Uuid, name: &str, data: Bytes) -> AppResult<()> {
        let path = self.resolve(owner_id, name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::InsertFailed,
                    format!("failed to create owner directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        fs::write(&path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::InsertFailed,
                format!("failed to write blob '{name}'"),
                e,
            )
        })?;

        debug!(%owner_id, name, bytes = data.len(), "wrote blob");
        Ok(())
    }

    fn locate(&self, owner_id: Uuid, name: &str) -> PathBuf {
        self.resolve(owner_id, name)
    }

    async fn exists(&self, owner_id: Uuid, name: &str) -> AppResult<bool> {
        let path = self.resolve(owner_id, name);
        match fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::with_source(
                ErrorKind::FindFailed,
                format!("failed to stat blob '{name}'"),
                e,
            )),
        }
    }

    async fn delete(&self, owner_id: Uuid, name: &str) -> AppResult<()> {
        let path = self.resolve(owner_id, name);
        fs::remove_file(&path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::DeleteFailed,
                format!("failed to delete blob '{name}'"),
                e,
            )
        })?;

        debug!(%owner_id, name, "deleted blob");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn make_store(dir: &tempfile::TempDir) -> LocalBlobStore {
        let config = StorageConfig {
            root: dir.path().join("blobs").to_string_lossy().into_owned(),
            ..Default::default()
        };
        LocalBlobStore::new(&config).await.unwrap()
    }

    #[tokio::test]
    async fn test_save_and_exists() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir).await;
        let owner = Uuid::new_v4();

        assert!(!store.exists(owner, "report.pdf").await.unwrap());
        store
            .save(owner, "report.pdf", Bytes::from_static(b"content"))
            .await
            .unwrap();
        assert!(store.exists(owner, "report.pdf").await.unwrap());

        let data = std::fs::read(store.locate(owner, "report.pdf")).unwrap();
        assert_eq!(data, b"content");
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir).await;
        let owner = Uuid::new_v4();

        store
            .save(owner, "a.txt", Bytes::from_static(b"first"))
            .await
            .unwrap();
        store
            .save(owner, "a.txt", Bytes::from_static(b"second"))
            .await
            .unwrap();

        let data = std::fs::read(store.locate(owner, "a.txt")).unwrap();
        assert_eq!(data, b"second");
    }

    #[tokio::test]
    async fn test_delete_of_absent_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir).await;
        let owner = Uuid::new_v4();

        let err = store.delete(owner, "nope.txt").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::DeleteFailed);
    }

    #[tokio::test]
    async fn test_owner_isolation() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir).await;
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store
            .save(alice, "shared-name.txt", Bytes::from_static(b"alice"))
            .await
            .unwrap();
        assert!(!store.exists(bob, "shared-name.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_name_cannot_escape_owner_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir).await;
        let owner = Uuid::new_v4();

        let path = store.locate(owner, "../sneaky.txt");
        assert!(path.starts_with(store.locate(owner, "x").parent().unwrap()));
    }
}
