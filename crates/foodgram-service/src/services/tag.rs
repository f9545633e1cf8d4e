//! Tag service

use foodgram_core::Snowflake;
use tracing::instrument;

use crate::dto::TagResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Read-only access to tags
pub struct TagService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TagService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All tags ordered by slug
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<TagResponse>> {
        let tags = self.ctx.tag_repo().list().await?;
        Ok(tags.iter().map(TagResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, tag_id: Snowflake) -> ServiceResult<TagResponse> {
        self.ctx
            .tag_repo()
            .find_by_id(tag_id)
            .await?
            .map(|tag| TagResponse::from(&tag))
            .ok_or_else(|| ServiceError::not_found("Tag", tag_id.to_string()))
    }
}
