//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    ingredient_amounts, CreateUserRequest, IngredientAmountRequest, LoginRequest, PageParams,
    RecipeCreateRequest, RecipeListQuery, RecipeUpdateRequest, RefreshTokenRequest,
    SetPasswordRequest,
};

pub use responses::{
    HealthChecks, HealthResponse, IngredientResponse, PageResponse, ReadinessResponse,
    RecipeIngredientResponse, RecipeReadResponse, RecipeShortResponse, SubscriptionResponse,
    TagResponse, TokenResponse, UserCreatedResponse, UserResponse,
};

pub use mappers::{
    recipe_read_view, recipe_short_view, subscription_view, subscription_views, user_view,
    RecipeFlags,
};
