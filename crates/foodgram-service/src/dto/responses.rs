//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use foodgram_core::Snowflake;
use serde::Serialize;

use super::requests::PageParams;

// ============================================================================
// Pagination
// ============================================================================

/// Page-number paginated list
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub count: i64,
    /// Relative URL of the next page
    pub next: Option<String>,
    /// Relative URL of the previous page
    pub previous: Option<String>,
    pub results: Vec<T>,
    #[serde(skip)]
    params: PageParams,
}

impl<T> PageResponse<T> {
    pub fn new(results: Vec<T>, count: i64, params: PageParams) -> Self {
        Self {
            count,
            next: None,
            previous: None,
            results,
            params,
        }
    }

    pub fn params(&self) -> PageParams {
        self.params
    }

    /// Fill `next`/`previous` from the request path and raw query string.
    ///
    /// Other query parameters are kept as they were sent.
    pub fn with_links(mut self, path: &str, query: Option<&str>) -> Self {
        let PageParams { page, limit } = self.params;
        let has_next = i64::from(page) * i64::from(limit) < self.count;

        self.next = has_next.then(|| page_link(path, query, page + 1));
        self.previous = (page > 1).then(|| page_link(path, query, page - 1));
        self
    }
}

/// Rebuild the query with a different page; page 1 drops the parameter
fn page_link(path: &str, query: Option<&str>, page: u32) -> String {
    let mut pairs: Vec<String> = query
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty() && !pair.starts_with("page="))
        .map(str::to_string)
        .collect();
    if page > 1 {
        pairs.push(format!("page={page}"));
    }

    if pairs.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{}", pairs.join("&"))
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Issued token pair
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub auth_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn bearer(auth_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            auth_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// User as seen by the caller
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub id: Snowflake,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Whether the caller follows this user; false for anonymous callers
    pub is_subscribed: bool,
}

/// Body returned by registration
#[derive(Debug, Clone, Serialize)]
pub struct UserCreatedResponse {
    pub email: String,
    pub id: Snowflake,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Followed author with a preview of their recipes
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub recipes: Vec<RecipeShortResponse>,
    pub recipes_count: i64,
}

// ============================================================================
// Reference Data Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TagResponse {
    pub id: Snowflake,
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngredientResponse {
    pub id: Snowflake,
    pub name: String,
    pub measurement_unit: String,
}

// ============================================================================
// Recipe Responses
// ============================================================================

/// Ingredient line of a recipe
#[derive(Debug, Clone, Serialize)]
pub struct RecipeIngredientResponse {
    pub id: Snowflake,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Full recipe representation
#[derive(Debug, Clone, Serialize)]
pub struct RecipeReadResponse {
    pub id: Snowflake,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    /// Public URL of the image
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub pub_date: DateTime<Utc>,
}

/// Compact recipe used in subscriptions, favorites and the cart
#[derive(Debug, Clone, Serialize)]
pub struct RecipeShortResponse {
    pub id: Snowflake,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let all_healthy = database_healthy && redis_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                redis: if redis_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(count: i64, page: u32) -> PageResponse<u8> {
        PageResponse::new(Vec::new(), count, PageParams::new(page, 6))
    }

    #[test]
    fn test_first_page_links() {
        let response = page(13, 1).with_links("/api/recipes", None);
        assert_eq!(response.next.as_deref(), Some("/api/recipes?page=2"));
        assert!(response.previous.is_none());
    }

    #[test]
    fn test_links_keep_other_parameters() {
        let response = page(13, 2).with_links("/api/recipes", Some("tags=lunch&page=2&tags=dinner"));
        assert_eq!(
            response.next.as_deref(),
            Some("/api/recipes?tags=lunch&tags=dinner&page=3")
        );
        assert_eq!(
            response.previous.as_deref(),
            Some("/api/recipes?tags=lunch&tags=dinner")
        );
    }

    #[test]
    fn test_last_page_has_no_next() {
        let response = page(12, 2).with_links("/api/users", Some("limit=6&page=2"));
        assert!(response.next.is_none());
        assert_eq!(response.previous.as_deref(), Some("/api/users?limit=6"));
    }

    #[test]
    fn test_page_serialization() {
        let json = serde_json::to_value(page(0, 1).with_links("/api/users", None)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"count": 0, "next": null, "previous": null, "results": []})
        );
    }

    #[test]
    fn test_subscription_flattens_user() {
        let subscription = SubscriptionResponse {
            user: UserResponse {
                email: "chef@example.com".to_string(),
                id: Snowflake::new(7),
                username: "chef".to_string(),
                first_name: "Анна".to_string(),
                last_name: "Иванова".to_string(),
                is_subscribed: true,
            },
            recipes: Vec::new(),
            recipes_count: 0,
        };
        let json = serde_json::to_value(&subscription).unwrap();
        assert_eq!(json["id"], "7");
        assert_eq!(json["is_subscribed"], true);
        assert_eq!(json["recipes_count"], 0);
    }

    #[test]
    fn test_token_response() {
        let token = TokenResponse::bearer("a".to_string(), "r".to_string(), 900);
        assert_eq!(token.token_type, "Bearer");
    }

    #[test]
    fn test_readiness_response() {
        let ready = ReadinessResponse::ready(true, true);
        assert!(ready.is_ready());
        assert_eq!(ready.checks.database, "healthy");

        let not_ready = ReadinessResponse::ready(true, false);
        assert_eq!(not_ready.status, "not_ready");
        assert_eq!(not_ready.checks.redis, "unhealthy");
    }
}
