//! Redis connection pool module.

mod redis_pool;

pub(crate) use redis_pool::signed_ttl;
pub use redis_pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
