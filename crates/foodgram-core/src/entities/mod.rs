//! Domain entities - core business objects

mod ingredient;
mod recipe;
mod relations;
mod tag;
mod user;

pub use ingredient::Ingredient;
pub use recipe::{IngredientAmount, Recipe, RecipeIngredient};
pub use relations::{Favorite, Follow, ShoppingCartEntry};
pub use tag::Tag;
pub use user::User;
