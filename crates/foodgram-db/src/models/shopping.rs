//! Shopping cart ingredient line (query result)

use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ShoppingListLineModel {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}
