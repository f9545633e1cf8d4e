//! Database models - SQLx-compatible structs for PostgreSQL tables

mod ingredient;
mod recipe;
mod shopping;
mod tag;
mod user;

pub use ingredient::IngredientModel;
pub use recipe::{RecipeIngredientModel, RecipeModel, RecipeTagModel};
pub use shopping::ShoppingListLineModel;
pub use tag::TagModel;
pub use user::UserModel;
