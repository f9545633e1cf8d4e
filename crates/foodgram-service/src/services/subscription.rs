//! Subscription service
//!
//! Follow/unfollow authors and list followed authors with recipe previews.

use foodgram_core::{DomainError, Follow, Snowflake, User};
use tracing::{info, instrument};

use crate::dto::{subscription_views, PageParams, PageResponse, SubscriptionResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::user::UserService;

/// Recipes shown per author when `recipes_limit` is not given
pub const DEFAULT_RECIPES_LIMIT: u32 = 3;

/// Subscription service
pub struct SubscriptionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SubscriptionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Follow an author
    #[instrument(skip(self))]
    pub async fn subscribe(
        &self,
        user_id: Snowflake,
        author_id: Snowflake,
        recipes_limit: Option<u32>,
    ) -> ServiceResult<SubscriptionResponse> {
        let author = UserService::new(self.ctx).get_entity(author_id).await?;
        let follow = Follow::new(user_id, author.id)?;

        if self.ctx.follow_repo().exists(user_id, author.id).await? {
            return Err(DomainError::AlreadySubscribed.into());
        }
        self.ctx.follow_repo().create(&follow).await?;

        info!(user_id = %user_id, author_id = %author.id, "Subscribed to author");
        self.view(&author, recipes_limit).await
    }

    /// Stop following an author
    #[instrument(skip(self))]
    pub async fn unsubscribe(&self, user_id: Snowflake, author_id: Snowflake) -> ServiceResult<()> {
        let author = UserService::new(self.ctx).get_entity(author_id).await?;
        if !self.ctx.follow_repo().delete(user_id, author.id).await? {
            return Err(DomainError::NotSubscribed.into());
        }

        info!(user_id = %user_id, author_id = %author.id, "Unsubscribed from author");
        Ok(())
    }

    /// Followed authors, most recent subscription first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        user_id: Snowflake,
        params: PageParams,
        recipes_limit: Option<u32>,
    ) -> ServiceResult<PageResponse<SubscriptionResponse>> {
        let page = self
            .ctx
            .follow_repo()
            .list_authors(user_id, params.request())
            .await?;

        let results = self.views(&page.items, recipes_limit).await?;
        Ok(PageResponse::new(results, page.total, params))
    }

    async fn view(
        &self,
        author: &User,
        recipes_limit: Option<u32>,
    ) -> ServiceResult<SubscriptionResponse> {
        let mut views = self.views(std::slice::from_ref(author), recipes_limit).await?;
        views
            .pop()
            .ok_or_else(|| ServiceError::internal("subscription view missing"))
    }

    /// Views for a page of authors; two queries regardless of page size
    async fn views(
        &self,
        authors: &[User],
        recipes_limit: Option<u32>,
    ) -> ServiceResult<Vec<SubscriptionResponse>> {
        if authors.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids: Vec<_> = authors.iter().map(|a| a.id).collect();
        let limit = i64::from(recipes_limit.unwrap_or(DEFAULT_RECIPES_LIMIT));
        let recipes = self
            .ctx
            .recipe_repo()
            .find_by_authors(&author_ids, limit)
            .await?;
        let counts = self.ctx.recipe_repo().count_by_authors(&author_ids).await?;

        Ok(subscription_views(authors, recipes, counts, self.ctx.media()))
    }
}
