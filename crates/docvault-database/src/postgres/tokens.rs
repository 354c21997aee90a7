//! Token ledger backed by PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_entity::token::AccessToken;

use crate::ledger::TokenLedger;

/// PostgreSQL implementation of [`TokenLedger`].
#[derive(Debug, Clone)]
pub struct PgTokenLedger {
    pool: PgPool,
}

impl PgTokenLedger {
    /// Create a new token ledger on the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenLedger for PgTokenLedger {
    async fn create_token(&self, token: &AccessToken) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO access_tokens (id, token, issued_at, expires_at, user_id) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(token.id)
        .bind(&token.token)
        .bind(token.issued_at)
        .bind(token.expires_at)
        .bind(token.user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::InsertFailed, "failed to create token", e))?;

        Ok(())
    }

    async fn find_token(&self, token: &str) -> AppResult<Option<AccessToken>> {
        sqlx::query_as::<_, AccessToken>("SELECT * FROM access_tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::FindFailed, "failed to find token", e))
    }

    async fn delete_token(&self, token: &str) -> AppResult<()> {
        // Zero rows affected is fine: delete-of-absent is idempotent.
        sqlx::query("DELETE FROM access_tokens WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::DeleteFailed, "failed to delete token", e)
            })?;

        Ok(())
    }
}
