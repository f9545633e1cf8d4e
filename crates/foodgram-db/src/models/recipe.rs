//! Recipe database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `recipes` table
#[derive(Debug, Clone, FromRow)]
pub struct RecipeModel {
    pub id: i64,
    pub author_id: i64,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub pub_date: DateTime<Utc>,
}

/// `recipe_ingredients` joined with `ingredients`
#[derive(Debug, Clone, FromRow)]
pub struct RecipeIngredientModel {
    pub recipe_id: i64,
    pub ingredient_id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// `recipe_tags` joined with `tags`
#[derive(Debug, Clone, FromRow)]
pub struct RecipeTagModel {
    pub recipe_id: i64,
    pub id: i64,
    pub name: String,
    pub color: String,
    pub slug: String,
}
