//! # foodgram-cache
//!
//! Redis layer: a managed connection pool and the refresh token store behind
//! login, token refresh and logout.
//!
//! ```ignore
//! use foodgram_cache::{RedisPool, RefreshSession, RefreshTokenStore};
//!
//! let pool = RedisPool::from_config(&config.redis)?;
//! let store = RefreshTokenStore::new(pool, config.jwt.refresh_token_expiry as u64);
//! store.store(&pair.refresh_token_id, &RefreshSession::new(user_id, pair.session_id)).await?;
//! ```

pub mod pool;
pub mod session;

pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
pub use session::{RefreshSession, RefreshTokenStore};
