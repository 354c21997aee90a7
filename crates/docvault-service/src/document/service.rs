//! Document catalog: ledger, blob store and cache kept consistent.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use docvault_auth::Claims;
use docvault_cache::{ResultCache, keys};
use docvault_core::config::AppConfig;
use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::timeout::with_timeout;
use docvault_core::traits::blob::BlobStore;
use docvault_database::ledger::DocumentLedger;
use docvault_entity::document::{Document, DocumentFilter, DocumentPayload, NewDocument};

/// Multi-tenant document operations over a ledger, a blob store and a
/// read-through cache.
///
/// The ledger is ground truth. The cache is populated only from ledger
/// reads and writes, and every mutation invalidates the cached entry
/// before it returns, so a cached document can never outlive its row.
#[derive(Clone)]
pub struct DocumentCatalog {
    documents: Arc<dyn DocumentLedger>,
    blobs: Arc<dyn BlobStore>,
    cache: ResultCache<Document>,
    tolerate_missing_on_delete: bool,
    default_timeout: Duration,
}

impl std::fmt::Debug for DocumentCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCatalog")
            .field("blobs", &self.blobs)
            .field("tolerate_missing_on_delete", &self.tolerate_missing_on_delete)
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}

impl DocumentCatalog {
    /// Wire the catalog from configuration and its backends.
    pub fn new(
        config: &AppConfig,
        documents: Arc<dyn DocumentLedger>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            documents,
            blobs,
            cache: ResultCache::new(&config.cache),
            tolerate_missing_on_delete: config.storage.tolerate_missing_on_delete,
            default_timeout: config.service.default_timeout(),
        }
    }

    /// Create a document, replacing any existing document of the same
    /// name within the caller's grant set.
    ///
    /// An `Inline` payload is stored in the metadata row itself; a
    /// `Blob` payload goes to the blob store under (owner id, name).
    pub async fn create(
        &self,
        claims: &Claims,
        new: NewDocument,
        payload: Option<DocumentPayload>,
    ) -> AppResult<Document> {
        with_timeout(self.default_timeout, "create_document", async {
            let mut grant = new.grant;
            if !grant.iter().any(|g| g == &claims.login) {
                grant.push(claims.login.clone());
            }

            let document = Document {
                id: Uuid::new_v4(),
                name: new.name,
                mime: new.mime,
                is_file: matches!(payload, Some(DocumentPayload::Blob(_))),
                public: new.public,
                created_at: Utc::now(),
                grant,
                json: match &payload {
                    Some(DocumentPayload::Inline(value)) => Some(value.clone()),
                    _ => None,
                },
            };

            // Same-name creation replaces: drop the existing row, its
            // blob if any, and its cache entry before inserting.
            if let Some(existing) = self
                .documents
                .find_by_name(&claims.login, &document.name)
                .await?
            {
                self.documents.delete(&claims.login, existing.id).await?;
                if existing.is_file && self.blobs.exists(claims.sub, &existing.name).await? {
                    self.blobs.delete(claims.sub, &existing.name).await?;
                }
                self.cache
                    .invalidate(&keys::document(claims.sub, existing.id))
                    .await;
                debug!(document_id = %existing.id, name = %document.name, "replaced document");
            }

            self.documents.insert(&document).await?;

            if let Some(DocumentPayload::Blob(data)) = payload {
                self.blobs.save(claims.sub, &document.name, data).await?;
                self.cache
                    .insert(keys::document(claims.sub, document.id), document.clone())
                    .await;
            }

            info!(document_id = %document.id, owner = %claims.login, "created document");
            Ok(document)
        })
        .await
    }

    /// Fetch a document by id along with the path where its blob
    /// lives (or would live). Reads through the cache.
    pub async fn get(&self, claims: &Claims, id: Uuid) -> AppResult<(Document, PathBuf)> {
        with_timeout(self.default_timeout, "get_document", async {
            let key = keys::document(claims.sub, id);
            if let Some(document) = self.cache.get(&key).await {
                let path = self.blobs.locate(claims.sub, &document.name);
                return Ok((document, path));
            }

            let document = self
                .documents
                .find_by_id(&claims.login, id)
                .await?
                .ok_or_else(|| AppError::no_documents(format!("no document with id {id}")))?;

            self.cache.insert(key, document.clone()).await;
            let path = self.blobs.locate(claims.sub, &document.name);
            Ok((document, path))
        })
        .await
    }

    /// List documents granted to the caller.
    ///
    /// The filter's login is overwritten with the authenticated login,
    /// so callers cannot enumerate another tenant's documents.
    pub async fn list(&self, claims: &Claims, mut filter: DocumentFilter) -> AppResult<Vec<Document>> {
        with_timeout(self.default_timeout, "list_documents", async {
            filter.login = claims.login.clone();
            self.documents.list(&filter).await
        })
        .await
    }

    /// Delete a document, its blob and its cache entry.
    ///
    /// When the store is configured to tolerate a missing blob, an
    /// absent blob is skipped; otherwise a failed blob delete aborts
    /// the operation and the metadata row stays in place.
    pub async fn delete(&self, claims: &Claims, id: Uuid) -> AppResult<()> {
        with_timeout(self.default_timeout, "delete_document", async {
            let document = self
                .documents
                .find_by_id(&claims.login, id)
                .await?
                .ok_or_else(|| AppError::no_documents(format!("no document with id {id}")))?;

            if document.is_file {
                if self.tolerate_missing_on_delete {
                    if self.blobs.exists(claims.sub, &document.name).await? {
                        self.blobs.delete(claims.sub, &document.name).await?;
                    }
                } else {
                    self.blobs.delete(claims.sub, &document.name).await?;
                }
            }

            self.documents.delete(&claims.login, id).await?;
            self.cache.invalidate(&keys::document(claims.sub, id)).await;

            info!(document_id = %id, owner = %claims.login, "deleted document");
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use docvault_core::error::ErrorKind;
    use docvault_database::memory::MemoryDocumentLedger;
    use docvault_storage::LocalBlobStore;

    fn claims(login: &str) -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            login: login.into(),
            exp: Utc::now().timestamp() + 300,
        }
    }

    fn new_doc(name: &str) -> NewDocument {
        NewDocument {
            name: name.into(),
            mime: "application/octet-stream".into(),
            public: false,
            grant: vec![],
        }
    }

    async fn catalog(dir: &tempfile::TempDir) -> DocumentCatalog {
        catalog_with(dir, |_| {}).await
    }

    async fn catalog_with(
        dir: &tempfile::TempDir,
        adjust: impl FnOnce(&mut AppConfig),
    ) -> DocumentCatalog {
        let mut config: AppConfig =
            serde_json::from_str(r#"{"database": {"url": "postgres://localhost/docvault"}}"#)
                .unwrap();
        config.storage.root = dir.path().join("blobs").to_string_lossy().into_owned();
        adjust(&mut config);
        let blobs = LocalBlobStore::new(&config.storage).await.unwrap();
        DocumentCatalog::new(
            &config,
            Arc::new(MemoryDocumentLedger::new()),
            Arc::new(blobs),
        )
    }

    #[tokio::test]
    async fn test_inline_create_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = catalog(&dir).await;
        let alice = claims("alice");

        let payload = serde_json::json!({"x": 1});
        let created = catalog
            .create(
                &alice,
                new_doc("note"),
                Some(DocumentPayload::Inline(payload.clone())),
            )
            .await
            .unwrap();
        assert!(!created.is_file);

        let (fetched, _) = catalog.get(&alice, created.id).await.unwrap();
        assert_eq!(fetched.json, Some(payload));
    }

    #[tokio::test]
    async fn test_blob_create_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = catalog(&dir).await;
        let alice = claims("alice");

        let created = catalog
            .create(
                &alice,
                new_doc("report.pdf"),
                Some(DocumentPayload::Blob(Bytes::from_static(b"pdf bytes"))),
            )
            .await
            .unwrap();
        assert!(created.is_file);

        let (_, path) = catalog.get(&alice, created.id).await.unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"pdf bytes");
    }

    #[tokio::test]
    async fn test_same_name_create_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = catalog(&dir).await;
        let alice = claims("alice");

        let first = catalog
            .create(
                &alice,
                new_doc("doc"),
                Some(DocumentPayload::Blob(Bytes::from_static(b"old"))),
            )
            .await
            .unwrap();
        let second = catalog
            .create(
                &alice,
                new_doc("doc"),
                Some(DocumentPayload::Inline(serde_json::json!({"v": 2}))),
            )
            .await
            .unwrap();

        // The old row, its blob and its cache entry are all gone.
        let err = catalog.get(&alice, first.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NoDocuments);

        let listed = catalog
            .list(&alice, DocumentFilter::default())
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);

        let (fetched, path) = catalog.get(&alice, second.id).await.unwrap();
        assert!(!fetched.is_file);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_cross_tenant_access_is_invisible() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = catalog(&dir).await;
        let alice = claims("alice");
        let mallory = claims("mallory");

        let created = catalog
            .create(
                &alice,
                new_doc("secret"),
                Some(DocumentPayload::Inline(serde_json::json!({}))),
            )
            .await
            .unwrap();

        let err = catalog.get(&mallory, created.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NoDocuments);
        let err = catalog.delete(&mallory, created.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NoDocuments);

        // Still there for its owner.
        assert!(catalog.get(&alice, created.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_grant_shares_access() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = catalog(&dir).await;
        let alice = claims("alice");
        let bob = claims("bob");

        let mut doc = new_doc("shared");
        doc.grant.push("bob".into());
        let created = catalog
            .create(&alice, doc, Some(DocumentPayload::Inline(serde_json::json!({}))))
            .await
            .unwrap();

        let (fetched, _) = catalog.get(&bob, created.id).await.unwrap();
        assert!(fetched.is_granted("alice"));
        assert!(fetched.is_granted("bob"));
    }

    #[tokio::test]
    async fn test_delete_invalidates_cache() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = catalog(&dir).await;
        let alice = claims("alice");

        let created = catalog
            .create(
                &alice,
                new_doc("cached"),
                Some(DocumentPayload::Blob(Bytes::from_static(b"data"))),
            )
            .await
            .unwrap();

        // Warm the cache, then delete.
        catalog.get(&alice, created.id).await.unwrap();
        catalog.delete(&alice, created.id).await.unwrap();

        let err = catalog.get(&alice, created.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NoDocuments);
    }

    #[tokio::test]
    async fn test_delete_with_missing_blob_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = catalog(&dir).await;
        let alice = claims("alice");

        let created = catalog
            .create(
                &alice,
                new_doc("vanished"),
                Some(DocumentPayload::Blob(Bytes::from_static(b"data"))),
            )
            .await
            .unwrap();

        // Remove the blob out of band; the delete still succeeds.
        std::fs::remove_file(catalog.blobs.locate(alice.sub, "vanished")).unwrap();
        catalog.delete(&alice, created.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_strict_delete_aborts_on_missing_blob() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = catalog_with(&dir, |config| {
            config.storage.tolerate_missing_on_delete = false;
        })
        .await;
        let alice = claims("alice");

        let created = catalog
            .create(
                &alice,
                new_doc("strict"),
                Some(DocumentPayload::Blob(Bytes::from_static(b"data"))),
            )
            .await
            .unwrap();

        // Remove the blob out of band; the unconditional delete fails
        // and the metadata row stays in place.
        std::fs::remove_file(catalog.blobs.locate(alice.sub, "strict")).unwrap();
        let err = catalog.delete(&alice, created.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::DeleteFailed);

        let (fetched, _) = catalog.get(&alice, created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_caller() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = catalog(&dir).await;
        let alice = claims("alice");
        let bob = claims("bob");

        catalog
            .create(
                &alice,
                new_doc("mine"),
                Some(DocumentPayload::Inline(serde_json::json!({}))),
            )
            .await
            .unwrap();

        // A filter naming another login is overruled.
        let sneaky = DocumentFilter {
            login: "alice".into(),
            ..Default::default()
        };
        assert!(catalog.list(&bob, sneaky).await.unwrap().is_empty());
    }
}
