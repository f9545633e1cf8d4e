//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! foodgram-core. Each repository owns a clone of the pool.

mod error;
mod favorite;
mod follow;
mod ingredient;
mod recipe;
mod shopping_cart;
mod tag;
mod user;

pub use favorite::PgFavoriteRepository;
pub use follow::PgFollowRepository;
pub use ingredient::PgIngredientRepository;
pub use recipe::PgRecipeRepository;
pub use shopping_cart::PgShoppingCartRepository;
pub use tag::PgTagRepository;
pub use user::PgUserRepository;
