//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(Snowflake),

    #[error("Tag not found: {0}")]
    TagNotFound(Snowflake),

    #[error("Ingredient not found: {0}")]
    IngredientNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Only the author can change this recipe")]
    NotRecipeAuthor,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Username already taken")]
    UsernameAlreadyExists,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Cannot subscribe to yourself")]
    CannotSubscribeToSelf,

    #[error("Already subscribed to this author")]
    AlreadySubscribed,

    #[error("Recipe is already in favorites")]
    AlreadyFavorited,

    #[error("Recipe is already in the shopping cart")]
    AlreadyInShoppingCart,

    #[error("Not subscribed to this author")]
    NotSubscribed,

    #[error("Recipe is not in favorites")]
    NotFavorited,

    #[error("Recipe is not in the shopping cart")]
    NotInShoppingCart,

    // =========================================================================
    // Infrastructure Errors
    // =========================================================================
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::RecipeNotFound(_) => "UNKNOWN_RECIPE",
            Self::TagNotFound(_) => "UNKNOWN_TAG",
            Self::IngredientNotFound(_) => "UNKNOWN_INGREDIENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::InvalidImage(_) => "INVALID_IMAGE",

            // Authorization
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::NotRecipeAuthor => "NOT_RECIPE_AUTHOR",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",

            // Business Rules
            Self::CannotSubscribeToSelf => "CANNOT_SUBSCRIBE_TO_SELF",
            Self::AlreadySubscribed => "ALREADY_SUBSCRIBED",
            Self::AlreadyFavorited => "ALREADY_FAVORITED",
            Self::AlreadyInShoppingCart => "ALREADY_IN_SHOPPING_CART",
            Self::NotSubscribed => "NOT_SUBSCRIBED",
            Self::NotFavorited => "NOT_FAVORITED",
            Self::NotInShoppingCart => "NOT_IN_SHOPPING_CART",

            // Infrastructure
            Self::ResourceUnavailable(_) => "RESOURCE_UNAVAILABLE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::RecipeNotFound(_)
                | Self::TagNotFound(_)
                | Self::IngredientNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidUsername(_)
                | Self::WeakPassword(_)
                | Self::InvalidImage(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::NotRecipeAuthor)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::UsernameAlreadyExists)
    }

    /// Check if this is a rejected relation change (self-follow, adding an
    /// existing entry or removing a missing one)
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Self::CannotSubscribeToSelf
                | Self::AlreadySubscribed
                | Self::AlreadyFavorited
                | Self::AlreadyInShoppingCart
                | Self::NotSubscribed
                | Self::NotFavorited
                | Self::NotInShoppingCart
        )
    }
}
