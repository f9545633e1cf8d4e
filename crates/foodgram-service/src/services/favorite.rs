//! Favorite service

use foodgram_core::{DomainError, Favorite, Snowflake};
use tracing::{info, instrument};

use crate::dto::{recipe_short_view, RecipeShortResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::recipe::RecipeService;

/// Favorite service
pub struct FavoriteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FavoriteService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Mark a recipe as favorite
    #[instrument(skip(self))]
    pub async fn add(
        &self,
        user_id: Snowflake,
        recipe_id: Snowflake,
    ) -> ServiceResult<RecipeShortResponse> {
        let recipe = RecipeService::new(self.ctx).get_entity(recipe_id).await?;
        if self.ctx.favorite_repo().exists(user_id, recipe.id).await? {
            return Err(DomainError::AlreadyFavorited.into());
        }
        self.ctx
            .favorite_repo()
            .create(&Favorite::new(user_id, recipe.id))
            .await?;

        info!(user_id = %user_id, recipe_id = %recipe.id, "Recipe added to favorites");
        Ok(recipe_short_view(&recipe, self.ctx.media()))
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, user_id: Snowflake, recipe_id: Snowflake) -> ServiceResult<()> {
        let recipe = RecipeService::new(self.ctx).get_entity(recipe_id).await?;
        if !self.ctx.favorite_repo().delete(user_id, recipe.id).await? {
            return Err(DomainError::NotFavorited.into());
        }

        info!(user_id = %user_id, recipe_id = %recipe.id, "Recipe removed from favorites");
        Ok(())
    }
}
