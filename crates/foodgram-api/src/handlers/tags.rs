//! Tag handlers

use axum::{extract::State, Json};
use foodgram_service::dto::TagResponse;
use foodgram_service::TagService;

use crate::extractors::IdPath;
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /tags
pub async fn list_tags(State(state): State<AppState>) -> ApiResult<Json<Vec<TagResponse>>> {
    let tags = TagService::new(state.service_context()).list().await?;
    Ok(Json(tags))
}

/// GET /tags/{id}
pub async fn get_tag(
    State(state): State<AppState>,
    IdPath(tag_id): IdPath,
) -> ApiResult<Json<TagResponse>> {
    let tag = TagService::new(state.service_context()).get(tag_id).await?;
    Ok(Json(tag))
}
