//! Shopping cart service
//!
//! Cart membership and the PDF shopping list built from it.

use foodgram_core::{aggregate, DomainError, ShoppingCartEntry, Snowflake};
use tracing::{error, info, instrument, warn};

use crate::dto::{recipe_short_view, RecipeShortResponse};
use crate::export::{layout_shopping_list, render_pdf, FontSource, SHOPPING_LIST_FILENAME};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::recipe::RecipeService;

/// Rendered shopping list
#[derive(Debug, Clone)]
pub struct ShoppingListFile {
    pub filename: &'static str,
    pub bytes: Vec<u8>,
}

/// Shopping cart service
pub struct ShoppingCartService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ShoppingCartService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Put a recipe into the cart
    #[instrument(skip(self))]
    pub async fn add(
        &self,
        user_id: Snowflake,
        recipe_id: Snowflake,
    ) -> ServiceResult<RecipeShortResponse> {
        let recipe = RecipeService::new(self.ctx).get_entity(recipe_id).await?;
        if self.ctx.shopping_cart_repo().exists(user_id, recipe.id).await? {
            return Err(DomainError::AlreadyInShoppingCart.into());
        }
        self.ctx
            .shopping_cart_repo()
            .create(&ShoppingCartEntry::new(user_id, recipe.id))
            .await?;

        info!(user_id = %user_id, recipe_id = %recipe.id, "Recipe added to shopping cart");
        Ok(recipe_short_view(&recipe, self.ctx.media()))
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, user_id: Snowflake, recipe_id: Snowflake) -> ServiceResult<()> {
        let recipe = RecipeService::new(self.ctx).get_entity(recipe_id).await?;
        if !self.ctx.shopping_cart_repo().delete(user_id, recipe.id).await? {
            return Err(DomainError::NotInShoppingCart.into());
        }

        info!(user_id = %user_id, recipe_id = %recipe.id, "Recipe removed from shopping cart");
        Ok(())
    }

    /// Aggregate the cart and render it as a PDF
    #[instrument(skip(self))]
    pub async fn download(&self, user_id: Snowflake) -> ServiceResult<ShoppingListFile> {
        let lines = self
            .ctx
            .shopping_cart_repo()
            .list_ingredient_lines(user_id)
            .await?;
        let aggregation = aggregate(lines);

        for conflict in &aggregation.unit_conflicts {
            warn!(
                user_id = %user_id,
                ingredient = %conflict.name,
                expected_unit = %conflict.expected_unit,
                found_unit = %conflict.found_unit,
                "Ingredient listed with different units; amount kept under the first unit"
            );
        }
        if aggregation.is_empty() {
            info!(user_id = %user_id, "Shopping cart is empty");
        }

        let pages = layout_shopping_list(&aggregation.items);
        let font = FontSource::new(&self.ctx.export().font_path)
            .load()
            .await
            .inspect_err(|e| error!(error = %e, "Shopping list font unavailable"))?;

        let bytes = tokio::task::spawn_blocking(move || render_pdf(&pages, &font))
            .await
            .map_err(|e| ServiceError::internal(format!("PDF rendering task failed: {e}")))?
            .inspect_err(|e| error!(error = %e, "Shopping list rendering failed"))?;

        info!(
            user_id = %user_id,
            items = aggregation.items.len(),
            size = bytes.len(),
            "Shopping list exported"
        );
        Ok(ShoppingListFile {
            filename: SHOPPING_LIST_FILENAME,
            bytes,
        })
    }
}
