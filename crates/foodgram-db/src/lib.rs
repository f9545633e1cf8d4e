//! # foodgram-db
//!
//! Database layer implementing the repository traits of `foodgram-core` with
//! PostgreSQL via SQLx.
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use foodgram_db::{create_pool, run_migrations, PgRecipeRepository, PoolConfig};
//!
//! async fn example(config: &foodgram_common::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::from(&config.database)).await?;
//!     run_migrations(&pool).await?;
//!     let recipes = PgRecipeRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgFavoriteRepository, PgFollowRepository, PgIngredientRepository, PgRecipeRepository,
    PgShoppingCartRepository, PgTagRepository, PgUserRepository,
};
