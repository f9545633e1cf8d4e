//! Ingredient database model

use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct IngredientModel {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}
