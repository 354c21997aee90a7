//! Ledger-gated token issuance and validation.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;
use uuid::Uuid;

use docvault_core::config::auth::AuthConfig;
use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_database::ledger::{TokenLedger, UserLedger};
use docvault_entity::token::AccessToken;
use docvault_entity::user::User;

use super::claims::Claims;

/// Issues, validates and revokes access tokens.
///
/// The token ledger is authoritative: a token whose ledger entry is
/// gone is invalid no matter what its signature says, and validating
/// an expired token deletes its entry so the expiry is observed at
/// most once.
#[derive(Clone)]
pub struct TokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
    tokens: Arc<dyn TokenLedger>,
    users: Arc<dyn UserLedger>,
}

impl std::fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl TokenAuthority {
    /// Creates an authority from auth configuration and its ledgers.
    pub fn new(
        config: &AuthConfig,
        tokens: Arc<dyn TokenLedger>,
        users: Arc<dyn UserLedger>,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is the authority's decision, not the decoder's: an
        // expired token must still decode so its ledger entry can be
        // revoked on sight.
        validation.validate_exp = false;

        Self {
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            validation,
            token_ttl: Duration::from_secs(config.token_ttl_minutes * 60),
            tokens,
            users,
        }
    }

    /// Issues a signed token for the user and records it in the ledger.
    pub async fn issue(&self, user: &User) -> AppResult<AccessToken> {
        let issued_at = Utc::now();
        let expires_at = issued_at + chrono::Duration::seconds(self.token_ttl.as_secs() as i64);

        let claims = Claims {
            sub: user.id,
            login: user.login.clone(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("failed to sign token: {e}")))?;

        let record = AccessToken {
            id: Uuid::new_v4(),
            token,
            issued_at,
            expires_at,
            user_id: user.id,
        };
        self.tokens.create_token(&record).await?;

        debug!(user_id = %user.id, "issued token");
        Ok(record)
    }

    /// Validates a raw token string and returns its claims.
    ///
    /// The checks run in order: ledger presence, signature, expiry,
    /// then the user behind the subject. An expired token has its
    /// ledger entry deleted before the error is returned.
    pub async fn validate(&self, token: &str) -> AppResult<Claims> {
        if self.tokens.find_token(token).await?.is_none() {
            return Err(AppError::invalid_token("token is not recognised"));
        }

        let decoded = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                AppError::with_source(ErrorKind::InvalidToken, "token failed verification", e)
            })?;
        let claims = decoded.claims;

        if claims.is_expired() {
            self.tokens.delete_token(token).await?;
            debug!(user_id = %claims.sub, "revoked expired token");
            return Err(AppError::invalid_token("token has expired"));
        }

        if self.users.find_by_login(&claims.login).await?.is_none() {
            return Err(AppError::user_not_found(format!(
                "user '{}' no longer exists",
                claims.login
            )));
        }

        Ok(claims)
    }

    /// Revokes a token. Revoking an unknown token succeeds.
    pub async fn revoke(&self, token: &str) -> AppResult<()> {
        self.tokens.delete_token(token).await
    }
}
