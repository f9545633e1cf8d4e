//! PostgreSQL implementation of IngredientRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use foodgram_core::entities::Ingredient;
use foodgram_core::traits::{IngredientRepository, RepoResult};
use foodgram_core::value_objects::Snowflake;

use crate::models::IngredientModel;

use super::error::{map_db_error, raw_ids};

/// PostgreSQL implementation of IngredientRepository
#[derive(Clone)]
pub struct PgIngredientRepository {
    pool: PgPool,
}

impl PgIngredientRepository {
    /// Create a new PgIngredientRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape LIKE wildcards so user input matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl IngredientRepository for PgIngredientRepository {
    #[instrument(skip(self))]
    async fn search(&self, name: Option<&str>) -> RepoResult<Vec<Ingredient>> {
        let needle = name.map(str::trim).filter(|n| !n.is_empty());

        let rows = match needle {
            None => {
                sqlx::query_as::<_, IngredientModel>(
                    "SELECT id, name, measurement_unit FROM ingredients ORDER BY name, id",
                )
                .fetch_all(&self.pool)
                .await
            }
            Some(needle) => {
                // Prefix matches rank before substring matches
                sqlx::query_as::<_, IngredientModel>(
                    r"
                    SELECT id, name, measurement_unit
                    FROM ingredients
                    WHERE LOWER(name) LIKE '%' || $1 || '%'
                    ORDER BY (LOWER(name) LIKE $1 || '%') DESC, name, id
                    ",
                )
                .bind(escape_like(&needle.to_lowercase()))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Ingredient::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Ingredient>> {
        let result = sqlx::query_as::<_, IngredientModel>(
            "SELECT id, name, measurement_unit FROM ingredients WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Ingredient::from))
    }

    #[instrument(skip(self))]
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Ingredient>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, IngredientModel>(
            "SELECT id, name, measurement_unit FROM ingredients WHERE id = ANY($1)",
        )
        .bind(raw_ids(ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Ingredient::from).collect())
    }
}
