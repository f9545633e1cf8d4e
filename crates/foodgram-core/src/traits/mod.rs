//! Ports implemented by the infrastructure crates

mod repositories;

pub use repositories::{
    FavoriteRepository, FollowRepository, IngredientRepository, Page, PageRequest, RecipeFilter,
    RecipeRepository, RepoResult, ShoppingCartRepository, TagRepository, UserRepository,
};
