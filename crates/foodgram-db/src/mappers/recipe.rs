//! Recipe model -> entity mapper

use std::collections::HashMap;

use foodgram_core::entities::{Recipe, RecipeIngredient, Tag};
use foodgram_core::value_objects::Snowflake;

use crate::models::{RecipeIngredientModel, RecipeModel, RecipeTagModel};

impl From<RecipeModel> for Recipe {
    fn from(model: RecipeModel) -> Self {
        Recipe {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            name: model.name,
            image: model.image,
            text: model.text,
            cooking_time: model.cooking_time,
            pub_date: model.pub_date,
            tags: Vec::new(),
            ingredients: Vec::new(),
        }
    }
}

impl From<RecipeIngredientModel> for RecipeIngredient {
    fn from(model: RecipeIngredientModel) -> Self {
        RecipeIngredient {
            ingredient_id: Snowflake::new(model.ingredient_id),
            name: model.name,
            measurement_unit: model.measurement_unit,
            amount: model.amount,
        }
    }
}

/// Build recipes from their rows.
///
/// Recipe order is kept; tag and ingredient rows keep their relative order
/// within each recipe. Rows for recipes not in `recipes` are dropped.
pub fn assemble_recipes(
    recipes: Vec<RecipeModel>,
    tags: Vec<RecipeTagModel>,
    ingredients: Vec<RecipeIngredientModel>,
) -> Vec<Recipe> {
    let mut tags_by_recipe: HashMap<i64, Vec<Tag>> = HashMap::new();
    for row in tags {
        tags_by_recipe.entry(row.recipe_id).or_default().push(Tag::from(row));
    }

    let mut lines_by_recipe: HashMap<i64, Vec<RecipeIngredient>> = HashMap::new();
    for row in ingredients {
        lines_by_recipe
            .entry(row.recipe_id)
            .or_default()
            .push(RecipeIngredient::from(row));
    }

    recipes
        .into_iter()
        .map(|model| {
            let id = model.id;
            let mut recipe = Recipe::from(model);
            recipe.tags = tags_by_recipe.remove(&id).unwrap_or_default();
            recipe.ingredients = lines_by_recipe.remove(&id).unwrap_or_default();
            recipe
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn recipe_row(id: i64) -> RecipeModel {
        RecipeModel {
            id,
            author_id: 1,
            name: format!("recipe {id}"),
            image: "recipes/images/x.png".into(),
            text: "text".into(),
            cooking_time: 10,
            pub_date: Utc::now(),
        }
    }

    fn tag_row(recipe_id: i64, id: i64, slug: &str) -> RecipeTagModel {
        RecipeTagModel {
            recipe_id,
            id,
            name: slug.to_uppercase(),
            color: "#ffffff".into(),
            slug: slug.into(),
        }
    }

    fn line_row(recipe_id: i64, ingredient_id: i64, amount: i32) -> RecipeIngredientModel {
        RecipeIngredientModel {
            recipe_id,
            ingredient_id,
            name: format!("ingredient {ingredient_id}"),
            measurement_unit: "g".into(),
            amount,
        }
    }

    #[test]
    fn test_rows_are_grouped_per_recipe() {
        let recipes = assemble_recipes(
            vec![recipe_row(2), recipe_row(1)],
            vec![tag_row(1, 10, "lunch"), tag_row(2, 11, "dinner"), tag_row(1, 12, "breakfast")],
            vec![line_row(2, 100, 5), line_row(1, 101, 3), line_row(2, 102, 7), line_row(9, 1, 1)],
        );

        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].id, Snowflake::new(2));
        assert_eq!(recipes[0].tags.len(), 1);
        assert_eq!(
            recipes[0].ingredients.iter().map(|i| i.amount).collect::<Vec<_>>(),
            vec![5, 7]
        );
        assert_eq!(
            recipes[1].tags.iter().map(|t| t.slug.as_str()).collect::<Vec<_>>(),
            vec!["lunch", "breakfast"]
        );
    }

    #[test]
    fn test_recipe_without_rows_has_empty_collections() {
        let recipes = assemble_recipes(vec![recipe_row(5)], vec![], vec![]);
        assert!(recipes[0].tags.is_empty());
        assert!(recipes[0].ingredients.is_empty());
    }
}
