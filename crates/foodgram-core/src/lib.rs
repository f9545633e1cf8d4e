//! # foodgram-core
//!
//! Domain layer containing entities, value objects, repository traits and the
//! shopping list aggregation. Nothing in here knows about SQL, Redis or HTTP.

pub mod entities;
pub mod error;
pub mod shopping;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Favorite, Follow, Ingredient, IngredientAmount, Recipe, RecipeIngredient, ShoppingCartEntry,
    Tag, User,
};
pub use error::DomainError;
pub use shopping::{aggregate, AggregatedIngredient, Aggregation, ShoppingListLine, UnitConflict};
pub use traits::{
    FavoriteRepository, FollowRepository, IngredientRepository, Page, PageRequest, RecipeFilter,
    RecipeRepository, RepoResult, ShoppingCartRepository, TagRepository, UserRepository,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
