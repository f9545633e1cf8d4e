//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer states what it needs; `foodgram-db` provides the
//! PostgreSQL implementation. Every method returns plain domain values so
//! callers never touch rows or connections.

use async_trait::async_trait;

use crate::entities::{
    Favorite, Follow, Ingredient, IngredientAmount, Recipe, ShoppingCartEntry, Tag, User,
};
use crate::error::DomainError;
use crate::shopping::ShoppingListLine;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Offset window for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
}

impl PageRequest {
    /// Build the window for a 1-based page number
    pub fn new(page: u32, limit: u32) -> Self {
        let limit = i64::from(limit.max(1));
        Self {
            limit,
            offset: i64::from(page.max(1) - 1) * limit,
        }
    }
}

/// One page of results together with the total row count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Recipe list filters; all present conditions must hold
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author_id: Option<Snowflake>,
    /// Matches recipes carrying any of these slugs
    pub tag_slugs: Vec<String>,
    pub favorited_by: Option<Snowflake>,
    pub in_cart_of: Option<Snowflake>,
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by (lowercased) email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Users whose ids are in `ids`; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Check if username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// List users ordered by registration
    async fn list(&self, page: PageRequest) -> RepoResult<Page<User>>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()>;
}

// ============================================================================
// Tag Repository
// ============================================================================

#[async_trait]
pub trait TagRepository: Send + Sync {
    /// All tags ordered by slug
    async fn list(&self) -> RepoResult<Vec<Tag>>;

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Tag>>;

    /// Tags whose ids are in `ids`; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Tag>>;
}

// ============================================================================
// Ingredient Repository
// ============================================================================

#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Search by name, prefix matches first, then substring matches
    async fn search(&self, name: Option<&str>) -> RepoResult<Vec<Ingredient>>;

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Ingredient>>;

    /// Ingredients whose ids are in `ids`; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Ingredient>>;
}

// ============================================================================
// Recipe Repository
// ============================================================================

#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Find recipe by ID with tags and ingredients loaded
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Recipe>>;

    /// Filtered page of recipes, newest first
    async fn list(&self, filter: &RecipeFilter, page: PageRequest) -> RepoResult<Page<Recipe>>;

    /// Up to `limit_per_author` newest recipes of each author, without tags
    /// or ingredients, newest first within an author
    async fn find_by_authors(
        &self,
        author_ids: &[Snowflake],
        limit_per_author: i64,
    ) -> RepoResult<Vec<Recipe>>;

    /// Recipe count per author; authors without recipes are omitted
    async fn count_by_authors(&self, author_ids: &[Snowflake])
        -> RepoResult<Vec<(Snowflake, i64)>>;

    /// Insert a recipe with its ingredient lines and tags in one transaction
    async fn create(
        &self,
        recipe: &Recipe,
        ingredients: &[IngredientAmount],
        tag_ids: &[Snowflake],
    ) -> RepoResult<()>;

    /// Update scalar fields; `Some` collections replace the stored ones
    async fn update(
        &self,
        recipe: &Recipe,
        ingredients: Option<&[IngredientAmount]>,
        tag_ids: Option<&[Snowflake]>,
    ) -> RepoResult<()>;

    /// Delete a recipe and everything that references it
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Follow Repository
// ============================================================================

#[async_trait]
pub trait FollowRepository: Send + Sync {
    async fn exists(&self, user_id: Snowflake, author_id: Snowflake) -> RepoResult<bool>;

    /// Subset of `author_ids` followed by `user_id`
    async fn followed_among(
        &self,
        user_id: Snowflake,
        author_ids: &[Snowflake],
    ) -> RepoResult<Vec<Snowflake>>;

    /// Authors followed by `user_id`, most recent subscription first
    async fn list_authors(&self, user_id: Snowflake, page: PageRequest) -> RepoResult<Page<User>>;

    async fn create(&self, follow: &Follow) -> RepoResult<()>;

    /// Returns false when there was nothing to delete
    async fn delete(&self, user_id: Snowflake, author_id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Favorite Repository
// ============================================================================

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    async fn exists(&self, user_id: Snowflake, recipe_id: Snowflake) -> RepoResult<bool>;

    /// Subset of `recipe_ids` favorited by `user_id`
    async fn favorited_among(
        &self,
        user_id: Snowflake,
        recipe_ids: &[Snowflake],
    ) -> RepoResult<Vec<Snowflake>>;

    async fn create(&self, favorite: &Favorite) -> RepoResult<()>;

    /// Returns false when there was nothing to delete
    async fn delete(&self, user_id: Snowflake, recipe_id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Shopping Cart Repository
// ============================================================================

#[async_trait]
pub trait ShoppingCartRepository: Send + Sync {
    async fn exists(&self, user_id: Snowflake, recipe_id: Snowflake) -> RepoResult<bool>;

    /// Subset of `recipe_ids` in the cart of `user_id`
    async fn in_cart_among(
        &self,
        user_id: Snowflake,
        recipe_ids: &[Snowflake],
    ) -> RepoResult<Vec<Snowflake>>;

    async fn create(&self, entry: &ShoppingCartEntry) -> RepoResult<()>;

    /// Returns false when there was nothing to delete
    async fn delete(&self, user_id: Snowflake, recipe_id: Snowflake) -> RepoResult<bool>;

    /// Every ingredient line of every recipe in the cart, in a stable order
    /// (cart insertion, then recipe, then line position)
    async fn list_ingredient_lines(&self, user_id: Snowflake) -> RepoResult<Vec<ShoppingListLine>>;
}
