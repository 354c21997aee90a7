//! In-memory document metadata ledger.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use docvault_core::result::AppResult;
use docvault_entity::document::{Document, DocumentFilter};

use crate::ledger::DocumentLedger;

/// In-memory implementation of [`DocumentLedger`], keyed by document id.
#[derive(Debug, Default)]
pub struct MemoryDocumentLedger {
    documents: DashMap<Uuid, Document>,
}

impl MemoryDocumentLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentLedger for MemoryDocumentLedger {
    async fn insert(&self, document: &Document) -> AppResult<()> {
        self.documents.insert(document.id, document.clone());
        Ok(())
    }

    async fn find_by_id(&self, login: &str, id: Uuid) -> AppResult<Option<Document>> {
        Ok(self
            .documents
            .get(&id)
            .filter(|d| d.is_granted(login))
            .map(|d| d.clone()))
    }

    async fn find_by_name(&self, login: &str, name: &str) -> AppResult<Option<Document>> {
        Ok(self
            .documents
            .iter()
            .find(|entry| entry.value().name == name && entry.value().is_granted(login))
            .map(|entry| entry.value().clone()))
    }

    async fn list(&self, filter: &DocumentFilter) -> AppResult<Vec<Document>> {
        filter.equality_clause()?;

        let mut matched: Vec<Document> = self
            .documents
            .iter()
            .filter(|entry| entry.value().is_granted(&filter.login))
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        matched.sort_by(|a, b| {
            b.name
                .cmp(&a.name)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        if filter.limit > 0 {
            matched.truncate(filter.limit as usize);
        }

        Ok(matched)
    }

    async fn delete(&self, login: &str, id: Uuid) -> AppResult<()> {
        self.documents
            .remove_if(&id, |_, document| document.is_granted(login));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn doc(name: &str, grant: &[&str]) -> Document {
        Document {
            id: Uuid::new_v4(),
            name: name.into(),
            mime: "text/plain".into(),
            is_file: false,
            public: false,
            created_at: Utc::now(),
            grant: grant.iter().map(|g| g.to_string()).collect(),
            json: None,
        }
    }

    #[tokio::test]
    async fn test_grant_scoping_on_lookup() {
        let ledger = MemoryDocumentLedger::new();
        let document = doc("a.txt", &["alice"]);
        ledger.insert(&document).await.unwrap();

        assert!(
            ledger
                .find_by_id("alice", document.id)
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            ledger
                .find_by_id("mallory", document.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_list_sorted_name_desc_with_limit() {
        let ledger = MemoryDocumentLedger::new();
        for name in ["a.txt", "c.txt", "b.txt"] {
            ledger.insert(&doc(name, &["alice"])).await.unwrap();
        }

        let filter = DocumentFilter {
            login: "alice".into(),
            limit: 2,
            ..Default::default()
        };
        let listed = ledger.list(&filter).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["c.txt", "b.txt"]);
    }

    #[tokio::test]
    async fn test_delete_requires_grant() {
        let ledger = MemoryDocumentLedger::new();
        let document = doc("a.txt", &["alice"]);
        ledger.insert(&document).await.unwrap();

        ledger.delete("mallory", document.id).await.unwrap();
        assert!(
            ledger
                .find_by_id("alice", document.id)
                .await
                .unwrap()
                .is_some()
        );

        ledger.delete("alice", document.id).await.unwrap();
        assert!(
            ledger
                .find_by_id("alice", document.id)
                .await
                .unwrap()
                .is_none()
        );
    }
}
