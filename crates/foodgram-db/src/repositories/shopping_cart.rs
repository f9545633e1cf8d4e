//! PostgreSQL implementation of ShoppingCartRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use foodgram_core::entities::ShoppingCartEntry;
use foodgram_core::error::DomainError;
use foodgram_core::shopping::ShoppingListLine;
use foodgram_core::traits::{RepoResult, ShoppingCartRepository};
use foodgram_core::value_objects::Snowflake;

use crate::models::ShoppingListLineModel;

use super::error::{map_db_error, map_unique_violation, raw_ids};

/// PostgreSQL implementation of ShoppingCartRepository
#[derive(Clone)]
pub struct PgShoppingCartRepository {
    pool: PgPool,
}

impl PgShoppingCartRepository {
    /// Create a new PgShoppingCartRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShoppingCartRepository for PgShoppingCartRepository {
    #[instrument(skip(self))]
    async fn exists(&self, user_id: Snowflake, recipe_id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM shopping_cart WHERE user_id = $1 AND recipe_id = $2)",
        )
        .bind(user_id.into_inner())
        .bind(recipe_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, recipe_ids))]
    async fn in_cart_among(
        &self,
        user_id: Snowflake,
        recipe_ids: &[Snowflake],
    ) -> RepoResult<Vec<Snowflake>> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT recipe_id FROM shopping_cart WHERE user_id = $1 AND recipe_id = ANY($2)",
        )
        .bind(user_id.into_inner())
        .bind(raw_ids(recipe_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Snowflake::new).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, entry: &ShoppingCartEntry) -> RepoResult<()> {
        sqlx::query("INSERT INTO shopping_cart (user_id, recipe_id, created_at) VALUES ($1, $2, $3)")
            .bind(entry.user_id.into_inner())
            .bind(entry.recipe_id.into_inner())
            .bind(entry.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, || DomainError::AlreadyInShoppingCart))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: Snowflake, recipe_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM shopping_cart WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id.into_inner())
            .bind(recipe_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list_ingredient_lines(&self, user_id: Snowflake) -> RepoResult<Vec<ShoppingListLine>> {
        let rows = sqlx::query_as::<_, ShoppingListLineModel>(
            r"
            SELECT i.name, i.measurement_unit, ri.amount
            FROM shopping_cart sc
            JOIN recipe_ingredients ri ON ri.recipe_id = sc.recipe_id
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE sc.user_id = $1
            ORDER BY sc.created_at, sc.recipe_id, ri.position
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ShoppingListLine::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgShoppingCartRepository>();
    }
}
