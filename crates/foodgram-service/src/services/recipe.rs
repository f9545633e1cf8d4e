//! Recipe service
//!
//! Recipe CRUD with author checks, reference validation and image handling,
//! plus the per-viewer read view.

use std::collections::{HashMap, HashSet};

use foodgram_core::{DomainError, IngredientAmount, Recipe, RecipeFilter, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{
    ingredient_amounts, recipe_read_view, user_view, PageParams, PageResponse,
    RecipeCreateRequest, RecipeFlags, RecipeListQuery, RecipeReadResponse, RecipeUpdateRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::user::UserService;

/// Recipe service
pub struct RecipeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RecipeService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Filtered page of recipes, newest first.
    ///
    /// The favorite and cart filters need a viewer; anonymous callers asking
    /// for them get an empty page.
    #[instrument(skip(self, query))]
    pub async fn list(
        &self,
        viewer: Option<Snowflake>,
        query: RecipeListQuery,
        params: PageParams,
    ) -> ServiceResult<PageResponse<RecipeReadResponse>> {
        let wants_viewer = query.is_favorited || query.is_in_shopping_cart;
        if wants_viewer && viewer.is_none() {
            return Ok(PageResponse::new(Vec::new(), 0, params));
        }

        let filter = RecipeFilter {
            author_id: query.author,
            tag_slugs: query.tags,
            favorited_by: viewer.filter(|_| query.is_favorited),
            in_cart_of: viewer.filter(|_| query.is_in_shopping_cart),
        };
        let page = self.ctx.recipe_repo().list(&filter, params.request()).await?;

        let results = self.read_views(viewer, &page.items).await?;
        Ok(PageResponse::new(results, page.total, params))
    }

    #[instrument(skip(self))]
    pub async fn get(
        &self,
        viewer: Option<Snowflake>,
        recipe_id: Snowflake,
    ) -> ServiceResult<RecipeReadResponse> {
        let recipe = self.get_entity(recipe_id).await?;
        self.read_view(viewer, &recipe).await
    }

    /// Create a recipe authored by `author_id`
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(
        &self,
        author_id: Snowflake,
        request: RecipeCreateRequest,
    ) -> ServiceResult<RecipeReadResponse> {
        let ingredients = ingredient_amounts(&request.ingredients);
        Recipe::validate_fields(&request.name, &request.text, request.cooking_time)?;
        Recipe::validate_ingredients(&ingredients)?;
        Recipe::validate_tags(&request.tags)?;
        self.ensure_ingredients_exist(&ingredients).await?;
        self.ensure_tags_exist(&request.tags).await?;

        let image = self.ctx.images().save(&request.image).await?;
        let recipe = Recipe::new(
            self.ctx.generate_id(),
            author_id,
            request.name.trim().to_string(),
            image,
            request.text,
            request.cooking_time,
        );

        if let Err(e) = self
            .ctx
            .recipe_repo()
            .create(&recipe, &ingredients, &request.tags)
            .await
        {
            self.ctx.images().remove(&recipe.image).await;
            return Err(e.into());
        }

        info!(recipe_id = %recipe.id, author_id = %author_id, "Recipe created");
        self.get(Some(author_id), recipe.id).await
    }

    /// Partially update a recipe; only its author may do so
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: Snowflake,
        recipe_id: Snowflake,
        request: RecipeUpdateRequest,
    ) -> ServiceResult<RecipeReadResponse> {
        let mut recipe = self.get_entity(recipe_id).await?;
        if !recipe.is_authored_by(user_id) {
            return Err(DomainError::NotRecipeAuthor.into());
        }

        if let Some(name) = request.name {
            recipe.name = name.trim().to_string();
        }
        if let Some(text) = request.text {
            recipe.text = text;
        }
        if let Some(cooking_time) = request.cooking_time {
            recipe.cooking_time = cooking_time;
        }
        Recipe::validate_fields(&recipe.name, &recipe.text, recipe.cooking_time)?;

        let ingredients = request.ingredients.as_deref().map(ingredient_amounts);
        if let Some(ingredients) = &ingredients {
            Recipe::validate_ingredients(ingredients)?;
            self.ensure_ingredients_exist(ingredients).await?;
        }
        if let Some(tags) = &request.tags {
            Recipe::validate_tags(tags)?;
            self.ensure_tags_exist(tags).await?;
        }

        let replaced_image = match &request.image {
            Some(data_uri) => {
                let image = self.ctx.images().save(data_uri).await?;
                Some(std::mem::replace(&mut recipe.image, image))
            }
            None => None,
        };

        let result = self
            .ctx
            .recipe_repo()
            .update(&recipe, ingredients.as_deref(), request.tags.as_deref())
            .await;
        match (result, replaced_image) {
            (Ok(()), Some(old)) => self.ctx.images().remove(&old).await,
            (Ok(()), None) => {}
            (Err(e), Some(_)) => {
                self.ctx.images().remove(&recipe.image).await;
                return Err(e.into());
            }
            (Err(e), None) => return Err(e.into()),
        }

        info!(recipe_id = %recipe.id, "Recipe updated");
        self.get(Some(user_id), recipe.id).await
    }

    /// Delete a recipe; only its author may do so
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Snowflake, recipe_id: Snowflake) -> ServiceResult<()> {
        let recipe = self.get_entity(recipe_id).await?;
        if !recipe.is_authored_by(user_id) {
            return Err(DomainError::NotRecipeAuthor.into());
        }

        self.ctx.recipe_repo().delete(recipe.id).await?;
        self.ctx.images().remove(&recipe.image).await;

        info!(recipe_id = %recipe.id, "Recipe deleted");
        Ok(())
    }

    /// Load a recipe or fail with 404
    pub async fn get_entity(&self, recipe_id: Snowflake) -> ServiceResult<Recipe> {
        self.ctx
            .recipe_repo()
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| DomainError::RecipeNotFound(recipe_id).into())
    }

    async fn read_view(
        &self,
        viewer: Option<Snowflake>,
        recipe: &Recipe,
    ) -> ServiceResult<RecipeReadResponse> {
        let mut views = self.read_views(viewer, std::slice::from_ref(recipe)).await?;
        views
            .pop()
            .ok_or_else(|| ServiceError::internal("recipe view was not built"))
    }

    /// Read views with authors and viewer flags loaded in batches
    async fn read_views(
        &self,
        viewer: Option<Snowflake>,
        recipes: &[Recipe],
    ) -> ServiceResult<Vec<RecipeReadResponse>> {
        if recipes.is_empty() {
            return Ok(Vec::new());
        }

        let recipe_ids: Vec<_> = recipes.iter().map(|r| r.id).collect();
        let mut author_ids: Vec<_> = recipes.iter().map(|r| r.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<_, _> = self
            .ctx
            .user_repo()
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();
        let followed = UserService::new(self.ctx)
            .followed_among(viewer, &author_ids)
            .await?;

        let (favorited, in_cart): (HashSet<_>, HashSet<_>) = match viewer {
            Some(viewer) => (
                self.ctx
                    .favorite_repo()
                    .favorited_among(viewer, &recipe_ids)
                    .await?
                    .into_iter()
                    .collect(),
                self.ctx
                    .shopping_cart_repo()
                    .in_cart_among(viewer, &recipe_ids)
                    .await?
                    .into_iter()
                    .collect(),
            ),
            None => (HashSet::new(), HashSet::new()),
        };

        recipes
            .iter()
            .map(|recipe| {
                let author = authors.get(&recipe.author_id).ok_or_else(|| {
                    ServiceError::internal(format!("author of recipe {} is missing", recipe.id))
                })?;
                let flags = RecipeFlags {
                    is_favorited: favorited.contains(&recipe.id),
                    is_in_shopping_cart: in_cart.contains(&recipe.id),
                };
                Ok(recipe_read_view(
                    recipe,
                    user_view(author, followed.contains(&author.id)),
                    flags,
                    self.ctx.media(),
                ))
            })
            .collect()
    }

    async fn ensure_ingredients_exist(&self, lines: &[IngredientAmount]) -> ServiceResult<()> {
        let ids: Vec<_> = lines.iter().map(|line| line.ingredient_id).collect();
        let found: HashSet<_> = self
            .ctx
            .ingredient_repo()
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|ingredient| ingredient.id)
            .collect();

        if let Some(missing) = ids.iter().find(|id| !found.contains(id)) {
            warn!(ingredient_id = %missing, "Recipe references an unknown ingredient");
            return Err(
                DomainError::ValidationError(format!("unknown ingredient {missing}")).into(),
            );
        }
        Ok(())
    }

    async fn ensure_tags_exist(&self, tag_ids: &[Snowflake]) -> ServiceResult<()> {
        let found: HashSet<_> = self
            .ctx
            .tag_repo()
            .find_by_ids(tag_ids)
            .await?
            .into_iter()
            .map(|tag| tag.id)
            .collect();

        if let Some(missing) = tag_ids.iter().find(|id| !found.contains(id)) {
            return Err(DomainError::ValidationError(format!("unknown tag {missing}")).into());
        }
        Ok(())
    }
}
