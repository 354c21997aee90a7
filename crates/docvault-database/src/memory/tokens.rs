//! In-memory token ledger.

use async_trait::async_trait;
use dashmap::DashMap;

use docvault_core::result::AppResult;
use docvault_entity::token::AccessToken;

use crate::ledger::TokenLedger;

/// In-memory implementation of [`TokenLedger`], keyed by token string.
#[derive(Debug, Default)]
pub struct MemoryTokenLedger {
    tokens: DashMap<String, AccessToken>,
}

impl MemoryTokenLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenLedger for MemoryTokenLedger {
    async fn create_token(&self, token: &AccessToken) -> AppResult<()> {
        self.tokens.insert(token.token.clone(), token.clone());
        Ok(())
    }

    async fn find_token(&self, token: &str) -> AppResult<Option<AccessToken>> {
        Ok(self.tokens.get(token).map(|t| t.clone()))
    }

    async fn delete_token(&self, token: &str) -> AppResult<()> {
        self.tokens.remove(token);
        Ok(())
    }
}
