//! Recipe handlers
//!
//! Recipe CRUD, favorites, shopping cart membership and the shopping list
//! download.

use axum::{extract::State, Json};
use axum_extra::extract::Query;
use foodgram_service::dto::{
    PageResponse, RecipeCreateRequest, RecipeListQuery, RecipeReadResponse, RecipeShortResponse,
    RecipeUpdateRequest,
};
use foodgram_service::{FavoriteService, RecipeService, ShoppingCartService};

use crate::extractors::{AuthUser, IdPath, OptionalAuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent, PdfAttachment};
use crate::state::AppState;

/// List recipes, newest first
///
/// GET /recipes?tags=&author=&is_favorited=&is_in_shopping_cart=
pub async fn list_recipes(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    pagination: Pagination,
    query: Result<Query<RecipeListQuery>, axum_extra::extract::QueryRejection>,
) -> ApiResult<Json<PageResponse<RecipeReadResponse>>> {
    let Query(query) = query.map_err(|e| ApiError::invalid_query(e.to_string()))?;
    let service = RecipeService::new(state.service_context());
    let page = service
        .list(auth.user_id(), query, pagination.params)
        .await?;
    Ok(Json(pagination.finish(page)))
}

/// Create a recipe
///
/// POST /recipes
pub async fn create_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<RecipeCreateRequest>,
) -> ApiResult<Created<Json<RecipeReadResponse>>> {
    let service = RecipeService::new(state.service_context());
    let recipe = service.create(auth.user_id, request).await?;
    Ok(Created(Json(recipe)))
}

/// GET /recipes/{id}
pub async fn get_recipe(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    IdPath(recipe_id): IdPath,
) -> ApiResult<Json<RecipeReadResponse>> {
    let service = RecipeService::new(state.service_context());
    let recipe = service.get(auth.user_id(), recipe_id).await?;
    Ok(Json(recipe))
}

/// Update a recipe (author only)
///
/// PATCH /recipes/{id}
pub async fn update_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(recipe_id): IdPath,
    ValidatedJson(request): ValidatedJson<RecipeUpdateRequest>,
) -> ApiResult<Json<RecipeReadResponse>> {
    let service = RecipeService::new(state.service_context());
    let recipe = service.update(auth.user_id, recipe_id, request).await?;
    Ok(Json(recipe))
}

/// Delete a recipe (author only)
///
/// DELETE /recipes/{id}
pub async fn delete_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(recipe_id): IdPath,
) -> ApiResult<NoContent> {
    let service = RecipeService::new(state.service_context());
    service.delete(auth.user_id, recipe_id).await?;
    Ok(NoContent)
}

/// POST /recipes/{id}/favorite
pub async fn add_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(recipe_id): IdPath,
) -> ApiResult<Created<Json<RecipeShortResponse>>> {
    let service = FavoriteService::new(state.service_context());
    let recipe = service.add(auth.user_id, recipe_id).await?;
    Ok(Created(Json(recipe)))
}

/// DELETE /recipes/{id}/favorite
pub async fn remove_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(recipe_id): IdPath,
) -> ApiResult<NoContent> {
    let service = FavoriteService::new(state.service_context());
    service.remove(auth.user_id, recipe_id).await?;
    Ok(NoContent)
}

/// POST /recipes/{id}/shopping_cart
pub async fn add_to_shopping_cart(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(recipe_id): IdPath,
) -> ApiResult<Created<Json<RecipeShortResponse>>> {
    let service = ShoppingCartService::new(state.service_context());
    let recipe = service.add(auth.user_id, recipe_id).await?;
    Ok(Created(Json(recipe)))
}

/// DELETE /recipes/{id}/shopping_cart
pub async fn remove_from_shopping_cart(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(recipe_id): IdPath,
) -> ApiResult<NoContent> {
    let service = ShoppingCartService::new(state.service_context());
    service.remove(auth.user_id, recipe_id).await?;
    Ok(NoContent)
}

/// Shopping list of every recipe in the cart, as a PDF
///
/// GET /recipes/download_shopping_cart
pub async fn download_shopping_cart(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<PdfAttachment> {
    let service = ShoppingCartService::new(state.service_context());
    let file = service.download(auth.user_id).await?;
    Ok(PdfAttachment(file))
}
