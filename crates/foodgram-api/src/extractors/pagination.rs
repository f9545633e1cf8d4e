//! Pagination extractor
//!
//! Extracts page-number pagination parameters and remembers the request URI
//! so list responses can link to neighbouring pages.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, OriginalUri, Query},
    http::request::Parts,
};
use foodgram_service::dto::{PageParams, PageResponse};
use serde::Deserialize;

use crate::response::ApiError;
use crate::state::AppState;

/// Raw pagination query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    /// 1-based page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Maximum number of items to return
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Validated pagination parameters
#[derive(Debug, Clone)]
pub struct Pagination {
    pub params: PageParams,
    path: String,
    query: Option<String>,
}

impl Pagination {
    /// Clamp raw parameters; `limit` falls back to `default_limit`
    pub fn from_params(
        params: &PaginationParams,
        default_limit: u32,
        max_limit: u32,
    ) -> PageParams {
        let max_limit = max_limit.max(1);
        PageParams::new(
            params.page.unwrap_or(1).max(1),
            params.limit.unwrap_or(default_limit).clamp(1, max_limit),
        )
    }

    /// Fill the `next`/`previous` links of a page built from these parameters
    pub fn finish<T>(&self, page: PageResponse<T>) -> PageResponse<T> {
        page.with_links(&self.path, self.query.as_deref())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        let app_state = AppState::from_ref(state);
        let config = app_state.service_context().pagination();
        let params = Self::from_params(&raw, config.page_size, config.max_page_size);

        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map_or_else(|| parts.uri.clone(), |original| original.0.clone());

        Ok(Self {
            params,
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
        })
    }
}
