//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests. Tag and ingredient ids
//! refer to the reference data seeded by the migrations.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Seeded tag "breakfast"
pub const TAG_BREAKFAST: i64 = 1;
/// Seeded tag "lunch"
pub const TAG_LUNCH: i64 = 2;
/// Seeded ingredient measured in grams
pub const INGREDIENT_BEEF: i64 = 4;
/// Seeded ingredient measured in pieces
pub const INGREDIENT_BEETROOT: i64 = 14;

/// A 1x1 transparent PNG
pub const TINY_PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// Get a unique suffix for test data
///
/// Mixes in the process id so reruns against the same database never collide.
pub fn unique_suffix() -> String {
    format!("{}x{}", std::process::id(), COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("cook{suffix}@example.com"),
            username: format!("cook{suffix}"),
            first_name: "Anna".to_string(),
            last_name: "Petrova".to_string(),
            password: "Kholodets#7".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Refresh request
#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Token pair response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub auth_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Public user representation
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub email: String,
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

/// Registration response
#[derive(Debug, Deserialize)]
pub struct UserCreatedResponse {
    pub email: String,
    pub id: String,
    pub username: String,
}

/// Paginated list envelope
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct TagResponse {
    pub id: String,
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct IngredientResponse {
    pub id: String,
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Deserialize)]
pub struct RecipeIngredientResponse {
    pub id: String,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Full recipe representation
#[derive(Debug, Deserialize)]
pub struct RecipeResponse {
    pub id: String,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

/// Short recipe representation
#[derive(Debug, Deserialize)]
pub struct RecipeShortResponse {
    pub id: String,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

/// Followed author with a preview of their recipes
#[derive(Debug, Deserialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub recipes: Vec<RecipeShortResponse>,
    pub recipes_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngredientAmount {
    pub id: i64,
    pub amount: i32,
}

/// Recipe creation request
#[derive(Debug, Clone, Serialize)]
pub struct CreateRecipeRequest {
    pub ingredients: Vec<IngredientAmount>,
    pub tags: Vec<i64>,
    pub image: String,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
}

impl CreateRecipeRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            ingredients: vec![
                IngredientAmount {
                    id: INGREDIENT_BEEF,
                    amount: 300,
                },
                IngredientAmount {
                    id: INGREDIENT_BEETROOT,
                    amount: 2,
                },
            ],
            tags: vec![TAG_LUNCH],
            image: TINY_PNG.to_string(),
            name: format!("Borscht {suffix}"),
            text: "Simmer the beef, add beetroot, serve with smetana.".to_string(),
            cooking_time: 90,
        }
    }
}

/// Partial recipe update
#[derive(Debug, Default, Serialize)]
pub struct UpdateRecipeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<i64>>,
}

#[derive(Debug, Serialize)]
pub struct SetPasswordRequest {
    pub new_password: String,
    pub current_password: String,
}
