//! PostgreSQL implementation of TagRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use foodgram_core::entities::Tag;
use foodgram_core::traits::{RepoResult, TagRepository};
use foodgram_core::value_objects::Snowflake;

use crate::models::TagModel;

use super::error::{map_db_error, raw_ids};

/// PostgreSQL implementation of TagRepository
#[derive(Clone)]
pub struct PgTagRepository {
    pool: PgPool,
}

impl PgTagRepository {
    /// Create a new PgTagRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, TagModel>("SELECT id, name, color, slug FROM tags ORDER BY slug")
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Tag>> {
        let result = sqlx::query_as::<_, TagModel>("SELECT id, name, color, slug FROM tags WHERE id = $1")
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Tag::from))
    }

    #[instrument(skip(self))]
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Tag>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, TagModel>(
            r"
            SELECT id, name, color, slug
            FROM tags
            WHERE id = ANY($1)
            ORDER BY slug
            ",
        )
        .bind(raw_ids(ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }
}
