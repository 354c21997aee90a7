//! Document metadata ledger backed by PostgreSQL.
//!
//! All scoped queries match `login = ANY(grant_logins)` so a caller can
//! only ever see documents they were granted.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_entity::document::{Document, DocumentFilter};

use crate::ledger::DocumentLedger;

/// PostgreSQL implementation of [`DocumentLedger`].
#[derive(Debug, Clone)]
pub struct PgDocumentLedger {
    pool: PgPool,
}

impl PgDocumentLedger {
    /// Create a new document ledger on the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentLedger for PgDocumentLedger {
    async fn insert(&self, document: &Document) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO documents (id, name, mime, is_file, public, created_at, grant_logins, json) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(document.id)
        .bind(&document.name)
        .bind(&document.mime)
        .bind(document.is_file)
        .bind(document.public)
        .bind(document.created_at)
        .bind(&document.grant)
        .bind(&document.json)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::InsertFailed, "failed to create document", e)
        })?;

        Ok(())
    }

    async fn find_by_id(&self, login: &str, id: Uuid) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE id = $1 AND $2 = ANY(grant_logins)",
        )
        .bind(id)
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::FindFailed, "failed to find document by id", e)
        })
    }

    async fn find_by_name(&self, login: &str, name: &str) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE name = $1 AND $2 = ANY(grant_logins)",
        )
        .bind(name)
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::FindFailed, "failed to find document by name", e)
        })
    }

    async fn list(&self, filter: &DocumentFilter) -> AppResult<Vec<Document>> {
        let clause = filter.equality_clause()?;

        // The clause key is validated against the filterable whitelist,
        // so interpolating the column name is safe; values stay bound.
        let mut sql = String::from("SELECT * FROM documents WHERE $1 = ANY(grant_logins)");
        if let Some((key, _)) = clause {
            let column = match key {
                "file" => "is_file",
                other => other,
            };
            sql.push_str(&format!(" AND {column}::text = $2"));
        }
        sql.push_str(" ORDER BY name DESC, created_at DESC");
        if filter.limit > 0 {
            sql.push_str(&format!(" LIMIT {}", filter.limit));
        }

        let mut query = sqlx::query_as::<_, Document>(&sql).bind(&filter.login);
        if let Some((_, value)) = clause {
            query = query.bind(value);
        }

        query.fetch_all(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::FindFailed, "failed to list documents", e)
        })
    }

    async fn delete(&self, login: &str, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM documents WHERE id = $1 AND $2 = ANY(grant_logins)")
            .bind(id)
            .bind(login)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::DeleteFailed, "failed to delete document", e)
            })?;

        Ok(())
    }
}
