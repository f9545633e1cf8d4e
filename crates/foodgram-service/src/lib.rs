//! # foodgram-service
//!
//! Application layer containing business logic, services, DTOs and the
//! shopping list PDF export.

pub mod dto;
pub mod export;
pub mod services;

pub use services::{
    AuthService, FavoriteService, IngredientService, RecipeService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, ShoppingCartService, ShoppingListFile,
    SubscriptionService, TagService, UserService,
};
