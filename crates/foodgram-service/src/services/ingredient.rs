//! Ingredient service

use foodgram_core::Snowflake;
use tracing::instrument;

use crate::dto::IngredientResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Read-only access to ingredients
pub struct IngredientService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IngredientService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Ingredients matching `name`; prefix matches come first
    #[instrument(skip(self))]
    pub async fn search(&self, name: Option<&str>) -> ServiceResult<Vec<IngredientResponse>> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let ingredients = self.ctx.ingredient_repo().search(name).await?;
        Ok(ingredients.iter().map(IngredientResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, ingredient_id: Snowflake) -> ServiceResult<IngredientResponse> {
        self.ctx
            .ingredient_repo()
            .find_by_id(ingredient_id)
            .await?
            .map(|ingredient| IngredientResponse::from(&ingredient))
            .ok_or_else(|| ServiceError::not_found("Ingredient", ingredient_id.to_string()))
    }
}
