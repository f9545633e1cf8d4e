//! Refresh token storage in Redis.
//!
//! Each refresh token is stored under its `jti` and can be used once: a
//! refresh consumes the stored entry and the caller stores the replacement.
//! A per-user set tracks live token ids so logout can revoke them all.

use chrono::Utc;
use foodgram_core::Snowflake;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

use crate::pool::{signed_ttl, RedisPool, RedisResult};

/// Key prefix for refresh tokens
const REFRESH_TOKEN_PREFIX: &str = "foodgram:refresh_token:";

/// Key prefix for the set of token ids of a user
const USER_TOKENS_PREFIX: &str = "foodgram:user_tokens:";

/// Stored refresh token data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshSession {
    pub user_id: Snowflake,
    /// Login session shared by every token issued from one login
    pub session_id: String,
    /// Unix seconds
    pub issued_at: i64,
}

impl RefreshSession {
    #[must_use]
    pub fn new(user_id: Snowflake, session_id: impl Into<String>) -> Self {
        Self {
            user_id,
            session_id: session_id.into(),
            issued_at: Utc::now().timestamp(),
        }
    }
}

/// Refresh token store for managing authentication sessions
#[derive(Clone, Debug)]
pub struct RefreshTokenStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl RefreshTokenStore {
    #[must_use]
    pub fn new(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    fn key(token_id: &str) -> String {
        format!("{REFRESH_TOKEN_PREFIX}{token_id}")
    }

    fn user_key(user_id: Snowflake) -> String {
        format!("{USER_TOKENS_PREFIX}{user_id}")
    }

    /// The underlying pool, for health checks
    #[must_use]
    pub fn pool(&self) -> &RedisPool {
        &self.pool
    }

    /// Store a refresh token
    pub async fn store(&self, token_id: &str, session: &RefreshSession) -> RedisResult<()> {
        self.pool
            .set_json(&Self::key(token_id), session, self.ttl_seconds)
            .await?;

        let user_key = Self::user_key(session.user_id);
        let mut conn = self.pool.get().await?;
        conn.sadd::<_, _, ()>(&user_key, token_id).await?;
        conn.expire::<_, ()>(&user_key, signed_ttl(self.ttl_seconds)?)
            .await?;

        tracing::debug!(
            token_id = %token_id,
            user_id = %session.user_id,
            session_id = %session.session_id,
            "Stored refresh token"
        );

        Ok(())
    }

    /// Look up a token without consuming it
    pub async fn get(&self, token_id: &str) -> RedisResult<Option<RefreshSession>> {
        self.pool.get_json(&Self::key(token_id)).await
    }

    /// Remove a token and return its data; `None` if unknown, expired or
    /// already used
    pub async fn consume(&self, token_id: &str) -> RedisResult<Option<RefreshSession>> {
        let session: Option<RefreshSession> = self.pool.take_json(&Self::key(token_id)).await?;

        if let Some(session) = &session {
            let mut conn = self.pool.get().await?;
            conn.srem::<_, _, ()>(Self::user_key(session.user_id), token_id)
                .await?;
        }

        Ok(session)
    }

    /// Revoke all tokens for a user
    pub async fn revoke_all_for_user(&self, user_id: Snowflake) -> RedisResult<u64> {
        let user_key = Self::user_key(user_id);
        let mut conn = self.pool.get().await?;

        let token_ids: Vec<String> = conn.smembers(&user_key).await?;
        let keys: Vec<String> = token_ids.iter().map(|id| Self::key(id)).collect();
        let revoked = self.pool.delete_many(&keys).await?;
        conn.del::<_, ()>(&user_key).await?;

        tracing::info!(user_id = %user_id, count = revoked, "Revoked refresh tokens");

        Ok(revoked)
    }

    /// Remaining lifetime of a token in seconds
    pub async fn ttl(&self, token_id: &str) -> RedisResult<Option<i64>> {
        self.pool.ttl(&Self::key(token_id)).await
    }
}
