//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Rules that need the database (existing ingredients, duplicate emails) are
//! checked by the services.

use foodgram_core::{IngredientAmount, PageRequest, Snowflake};
use serde::{de, Deserialize, Deserializer, Serialize};
use validator::Validate;

// ============================================================================
// Pagination
// ============================================================================

/// Page-number pagination parameters, already clamped by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
}

impl PageParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Offset window for the repositories
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Email/password login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(
        email(message = "Invalid email format"),
        length(max = 254, message = "Email must be at most 254 characters")
    )]
    pub email: String,

    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,

    #[validate(length(min = 1, max = 150, message = "First name must be 1-150 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 150, message = "Last name must be 1-150 characters"))]
    pub last_name: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Change the current user's password
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetPasswordRequest {
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub new_password: String,

    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
}

// ============================================================================
// Recipe Requests
// ============================================================================

/// One ingredient line of a recipe body
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct IngredientAmountRequest {
    pub id: Snowflake,

    #[validate(range(min = 1, message = "Amount must be at least 1"))]
    pub amount: i32,
}

impl From<&IngredientAmountRequest> for IngredientAmount {
    fn from(line: &IngredientAmountRequest) -> Self {
        Self {
            ingredient_id: line.id,
            amount: line.amount,
        }
    }
}

/// Create recipe request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeCreateRequest {
    #[validate(
        length(min = 1, message = "At least one ingredient is required"),
        nested
    )]
    pub ingredients: Vec<IngredientAmountRequest>,

    #[validate(length(min = 1, message = "At least one tag is required"))]
    pub tags: Vec<Snowflake>,

    /// `data:image/<type>;base64,<payload>`
    #[validate(length(min = 1, message = "Image is required"))]
    pub image: String,

    #[validate(length(min = 1, max = 150, message = "Name must be 1-150 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 2000, message = "Text must be 1-2000 characters"))]
    pub text: String,

    #[validate(range(min = 1, message = "Cooking time must be at least 1 minute"))]
    pub cooking_time: i32,
}

/// Partial recipe update; present collections replace the stored ones
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RecipeUpdateRequest {
    #[validate(
        length(min = 1, message = "At least one ingredient is required"),
        nested
    )]
    pub ingredients: Option<Vec<IngredientAmountRequest>>,

    #[validate(length(min = 1, message = "At least one tag is required"))]
    pub tags: Option<Vec<Snowflake>>,

    #[validate(length(min = 1, message = "Image must not be empty"))]
    pub image: Option<String>,

    #[validate(length(min = 1, max = 150, message = "Name must be 1-150 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 2000, message = "Text must be 1-2000 characters"))]
    pub text: Option<String>,

    #[validate(range(min = 1, message = "Cooking time must be at least 1 minute"))]
    pub cooking_time: Option<i32>,
}

/// Recipe list filters from the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeListQuery {
    pub author: Option<Snowflake>,

    /// Tag slugs; a recipe matches when it carries any of them
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "flag")]
    pub is_favorited: bool,

    #[serde(default, deserialize_with = "flag")]
    pub is_in_shopping_cart: bool,
}

/// Accepts `0`/`1`/`true`/`false`
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = String::deserialize(deserializer)?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" | "" => Ok(false),
        other => Err(de::Error::invalid_value(
            de::Unexpected::Str(other),
            &"one of 0, 1, true, false",
        )),
    }
}

/// Convert request lines into domain ingredient amounts
pub fn ingredient_amounts(lines: &[IngredientAmountRequest]) -> Vec<IngredientAmount> {
    lines.iter().map(IngredientAmount::from).collect()
}
