//! Recipe entity - owned by its author, composed of ingredients and tags

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::entities::Tag;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Maximum recipe name length
pub const RECIPE_NAME_MAX_LEN: usize = 150;

/// Maximum recipe description length
pub const RECIPE_TEXT_MAX_LEN: usize = 2000;

/// Ingredient line as it appears on a stored recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub ingredient_id: Snowflake,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Ingredient reference and amount supplied when writing a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient_id: Snowflake,
    pub amount: i32,
}

/// Recipe with its tags and ingredient lines loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub name: String,
    /// Path of the stored image, relative to the media root
    pub image: String,
    pub text: String,
    /// Minutes
    pub cooking_time: i32,
    pub pub_date: DateTime<Utc>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
}

impl Recipe {
    /// Create a new recipe without tags or ingredients attached
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        name: String,
        image: String,
        text: String,
        cooking_time: i32,
    ) -> Self {
        Self {
            id,
            author_id,
            name,
            image,
            text,
            cooking_time,
            pub_date: Utc::now(),
            tags: Vec::new(),
            ingredients: Vec::new(),
        }
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    pub fn tag_ids(&self) -> Vec<Snowflake> {
        self.tags.iter().map(|t| t.id).collect()
    }

    /// Validate scalar fields
    pub fn validate_fields(name: &str, text: &str, cooking_time: i32) -> Result<(), DomainError> {
        if name.trim().is_empty() || name.chars().count() > RECIPE_NAME_MAX_LEN {
            return Err(DomainError::ValidationError(format!(
                "name must be between 1 and {RECIPE_NAME_MAX_LEN} characters"
            )));
        }
        if text.trim().is_empty() || text.chars().count() > RECIPE_TEXT_MAX_LEN {
            return Err(DomainError::ValidationError(format!(
                "text must be between 1 and {RECIPE_TEXT_MAX_LEN} characters"
            )));
        }
        if cooking_time < 1 {
            return Err(DomainError::ValidationError(
                "cooking_time must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate ingredient lines: non-empty, positive amounts, no repeats
    pub fn validate_ingredients(ingredients: &[IngredientAmount]) -> Result<(), DomainError> {
        if ingredients.is_empty() {
            return Err(DomainError::ValidationError(
                "a recipe needs at least one ingredient".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(ingredients.len());
        for line in ingredients {
            if line.amount < 1 {
                return Err(DomainError::ValidationError(
                    "ingredient amount must be greater than zero".to_string(),
                ));
            }
            if !seen.insert(line.ingredient_id) {
                return Err(DomainError::ValidationError(format!(
                    "ingredient {} is listed more than once",
                    line.ingredient_id
                )));
            }
        }
        Ok(())
    }

    /// Validate tag references: non-empty, no repeats
    pub fn validate_tags(tag_ids: &[Snowflake]) -> Result<(), DomainError> {
        if tag_ids.is_empty() {
            return Err(DomainError::ValidationError(
                "a recipe needs at least one tag".to_string(),
            ));
        }
        let unique: HashSet<_> = tag_ids.iter().collect();
        if unique.len() != tag_ids.len() {
            return Err(DomainError::ValidationError(
                "tags must not repeat".to_string(),
            ));
        }
        Ok(())
    }
}
