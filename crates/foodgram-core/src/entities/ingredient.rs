//! Ingredient entity - immutable reference data

use crate::value_objects::Snowflake;

/// Purchasable ingredient and the unit it is measured in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: Snowflake,
    pub name: String,
    pub measurement_unit: String,
}

impl Ingredient {
    pub fn new(id: Snowflake, name: String, measurement_unit: String) -> Self {
        Self {
            id,
            name,
            measurement_unit,
        }
    }
}
