//! User handlers
//!
//! Endpoints for registration, profiles, passwords and subscriptions.

use axum::{
    extract::{Query, State},
    Json,
};
use foodgram_service::dto::{
    CreateUserRequest, PageResponse, SetPasswordRequest, SubscriptionResponse,
    UserCreatedResponse, UserResponse,
};
use foodgram_service::{SubscriptionService, UserService};
use serde::Deserialize;

use crate::extractors::{AuthUser, IdPath, OptionalAuthUser, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// `recipes_limit` query parameter of subscription endpoints
#[derive(Debug, Default, Deserialize)]
pub struct RecipesLimitQuery {
    pub recipes_limit: Option<u32>,
}

/// List users
///
/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    pagination: Pagination,
) -> ApiResult<Json<PageResponse<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let page = service.list(auth.user_id(), pagination.params).await?;
    Ok(Json(pagination.finish(page)))
}

/// Register a new user
///
/// POST /users
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<Json<UserCreatedResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Get current user
///
/// GET /users/me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.me(auth.user_id).await?;
    Ok(Json(response))
}

/// Change the current user's password
///
/// POST /users/set_password
pub async fn set_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SetPasswordRequest>,
) -> ApiResult<NoContent> {
    let service = UserService::new(state.service_context());
    service.set_password(auth.user_id, request).await?;
    Ok(NoContent)
}

/// Get user by ID
///
/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get(auth.user_id(), user_id).await?;
    Ok(Json(response))
}

/// Authors the current user follows
///
/// GET /users/subscriptions
pub async fn list_subscriptions(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
    Query(query): Query<RecipesLimitQuery>,
) -> ApiResult<Json<PageResponse<SubscriptionResponse>>> {
    let service = SubscriptionService::new(state.service_context());
    let page = service
        .list(auth.user_id, pagination.params, query.recipes_limit)
        .await?;
    Ok(Json(pagination.finish(page)))
}

/// Follow an author
///
/// POST /users/{id}/subscribe
pub async fn subscribe(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(author_id): IdPath,
    Query(query): Query<RecipesLimitQuery>,
) -> ApiResult<Created<Json<SubscriptionResponse>>> {
    let service = SubscriptionService::new(state.service_context());
    let response = service
        .subscribe(auth.user_id, author_id, query.recipes_limit)
        .await?;
    Ok(Created(Json(response)))
}

/// Stop following an author
///
/// DELETE /users/{id}/subscribe
pub async fn unsubscribe(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(author_id): IdPath,
) -> ApiResult<NoContent> {
    let service = SubscriptionService::new(state.service_context());
    service.unsubscribe(auth.user_id, author_id).await?;
    Ok(NoContent)
}
