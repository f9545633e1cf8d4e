//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod context;
pub mod error;
pub mod favorite;
pub mod ingredient;
pub mod media;
pub mod recipe;
pub mod shopping_cart;
pub mod subscription;
pub mod tag;
pub mod user;

// Re-export all services for convenience
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use favorite::FavoriteService;
pub use ingredient::IngredientService;
pub use media::{decode_data_uri, ImageStorage};
pub use recipe::RecipeService;
pub use shopping_cart::{ShoppingCartService, ShoppingListFile};
pub use subscription::{SubscriptionService, DEFAULT_RECIPES_LIMIT};
pub use tag::TagService;
pub use user::UserService;
