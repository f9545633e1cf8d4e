//! Tag, ingredient and shopping line mappers

use foodgram_core::entities::{Ingredient, Tag};
use foodgram_core::shopping::ShoppingListLine;
use foodgram_core::value_objects::Snowflake;

use crate::models::{IngredientModel, RecipeTagModel, ShoppingListLineModel, TagModel};

impl From<TagModel> for Tag {
    fn from(model: TagModel) -> Self {
        Tag {
            id: Snowflake::new(model.id),
            name: model.name,
            color: model.color,
            slug: model.slug,
        }
    }
}

impl From<RecipeTagModel> for Tag {
    fn from(model: RecipeTagModel) -> Self {
        Tag {
            id: Snowflake::new(model.id),
            name: model.name,
            color: model.color,
            slug: model.slug,
        }
    }
}

impl From<IngredientModel> for Ingredient {
    fn from(model: IngredientModel) -> Self {
        Ingredient::new(Snowflake::new(model.id), model.name, model.measurement_unit)
    }
}

impl From<ShoppingListLineModel> for ShoppingListLine {
    fn from(model: ShoppingListLineModel) -> Self {
        ShoppingListLine::new(model.name, model.measurement_unit, model.amount)
    }
}
