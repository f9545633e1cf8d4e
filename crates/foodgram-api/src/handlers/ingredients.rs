//! Ingredient handlers

use axum::{
    extract::{Query, State},
    Json,
};
use foodgram_service::dto::IngredientResponse;
use foodgram_service::IngredientService;
use serde::Deserialize;

use crate::extractors::IdPath;
use crate::response::ApiResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct IngredientSearchQuery {
    /// Case-insensitive name fragment
    pub name: Option<String>,
}

/// GET /ingredients?name=
pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(query): Query<IngredientSearchQuery>,
) -> ApiResult<Json<Vec<IngredientResponse>>> {
    let service = IngredientService::new(state.service_context());
    let ingredients = service.search(query.name.as_deref()).await?;
    Ok(Json(ingredients))
}

/// GET /ingredients/{id}
pub async fn get_ingredient(
    State(state): State<AppState>,
    IdPath(ingredient_id): IdPath,
) -> ApiResult<Json<IngredientResponse>> {
    let service = IngredientService::new(state.service_context());
    let ingredient = service.get(ingredient_id).await?;
    Ok(Json(ingredient))
}
