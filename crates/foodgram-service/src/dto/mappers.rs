//! Entity to DTO mappers
//!
//! Reference data converts with `From`. Users and recipes depend on who is
//! asking, so each response shape has one named view function.

use std::collections::HashMap;

use foodgram_common::MediaConfig;
use foodgram_core::{Ingredient, Recipe, RecipeIngredient, Snowflake, Tag, User};

use super::responses::{
    IngredientResponse, RecipeIngredientResponse, RecipeReadResponse, RecipeShortResponse,
    SubscriptionResponse, TagResponse, UserCreatedResponse, UserResponse,
};

// ============================================================================
// Reference Data Mappers
// ============================================================================

impl From<&Tag> for TagResponse {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name.clone(),
            color: tag.color.clone(),
            slug: tag.slug.clone(),
        }
    }
}

impl From<&Ingredient> for IngredientResponse {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name.clone(),
            measurement_unit: ingredient.measurement_unit.clone(),
        }
    }
}

impl From<&RecipeIngredient> for RecipeIngredientResponse {
    fn from(line: &RecipeIngredient) -> Self {
        Self {
            id: line.ingredient_id,
            name: line.name.clone(),
            measurement_unit: line.measurement_unit.clone(),
            amount: line.amount,
        }
    }
}

// ============================================================================
// User Mappers
// ============================================================================

pub fn user_view(user: &User, is_subscribed: bool) -> UserResponse {
    UserResponse {
        email: user.email.clone(),
        id: user.id,
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        is_subscribed,
    }
}

impl From<&User> for UserCreatedResponse {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// A followed author; the caller is subscribed by definition
pub fn subscription_view(
    author: &User,
    recipes: &[Recipe],
    recipes_count: i64,
    media: &MediaConfig,
) -> SubscriptionResponse {
    SubscriptionResponse {
        user: user_view(author, true),
        recipes: recipes
            .iter()
            .map(|recipe| recipe_short_view(recipe, media))
            .collect(),
        recipes_count,
    }
}

/// One view per author, in `authors` order, from batch-loaded recipes and counts
pub fn subscription_views(
    authors: &[User],
    recipes: Vec<Recipe>,
    counts: Vec<(Snowflake, i64)>,
    media: &MediaConfig,
) -> Vec<SubscriptionResponse> {
    let mut by_author: HashMap<Snowflake, Vec<Recipe>> = HashMap::new();
    for recipe in recipes {
        by_author.entry(recipe.author_id).or_default().push(recipe);
    }
    let counts: HashMap<_, _> = counts.into_iter().collect();

    authors
        .iter()
        .map(|author| {
            subscription_view(
                author,
                by_author.get(&author.id).map_or(&[][..], Vec::as_slice),
                counts.get(&author.id).copied().unwrap_or(0),
                media,
            )
        })
        .collect()
}

// ============================================================================
// Recipe Mappers
// ============================================================================

/// Per-viewer recipe flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecipeFlags {
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Read view of a recipe with its tags and ingredients loaded
pub fn recipe_read_view(
    recipe: &Recipe,
    author: UserResponse,
    flags: RecipeFlags,
    media: &MediaConfig,
) -> RecipeReadResponse {
    RecipeReadResponse {
        id: recipe.id,
        tags: recipe.tags.iter().map(TagResponse::from).collect(),
        author,
        ingredients: recipe
            .ingredients
            .iter()
            .map(RecipeIngredientResponse::from)
            .collect(),
        is_favorited: flags.is_favorited,
        is_in_shopping_cart: flags.is_in_shopping_cart,
        name: recipe.name.clone(),
        image: media.public_url(&recipe.image),
        text: recipe.text.clone(),
        cooking_time: recipe.cooking_time,
        pub_date: recipe.pub_date,
    }
}

pub fn recipe_short_view(recipe: &Recipe, media: &MediaConfig) -> RecipeShortResponse {
    RecipeShortResponse {
        id: recipe.id,
        name: recipe.name.clone(),
        image: media.public_url(&recipe.image),
        cooking_time: recipe.cooking_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodgram_core::Snowflake;
    use std::path::PathBuf;

    fn media() -> MediaConfig {
        MediaConfig {
            root: PathBuf::from("./media"),
            url: "/media/".to_string(),
            max_image_size_mb: 5,
        }
    }

    fn recipe() -> Recipe {
        let mut recipe = Recipe::new(
            Snowflake::new(10),
            Snowflake::new(1),
            "Окрошка".to_string(),
            "recipes/images/abc.png".to_string(),
            "Нарезать и залить квасом.".to_string(),
            20,
        );
        recipe.tags.push(Tag::new(
            Snowflake::new(2),
            "Обед".to_string(),
            Some("#49B64E".to_string()),
            "lunch".to_string(),
        ));
        recipe.ingredients.push(RecipeIngredient {
            ingredient_id: Snowflake::new(6),
            name: "картофель".to_string(),
            measurement_unit: "г".to_string(),
            amount: 300,
        });
        recipe
    }

    fn author() -> User {
        User::new(Snowflake::new(1), "chef@example.com", "chef", "анна", "иванова")
    }

    #[test]
    fn test_recipe_read_view() {
        let view = recipe_read_view(
            &recipe(),
            user_view(&author(), false),
            RecipeFlags {
                is_favorited: true,
                is_in_shopping_cart: false,
            },
            &media(),
        );

        assert_eq!(view.image, "/media/recipes/images/abc.png");
        assert_eq!(view.tags[0].slug, "lunch");
        assert_eq!(view.ingredients[0].id, Snowflake::new(6));
        assert_eq!(view.ingredients[0].amount, 300);
        assert_eq!(view.author.first_name, "Анна");
        assert!(view.is_favorited);
        assert!(!view.is_in_shopping_cart);
    }

    #[test]
    fn test_recipe_short_view_has_only_short_fields() {
        let json = serde_json::to_value(recipe_short_view(&recipe(), &media())).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 4);
        assert_eq!(json["cooking_time"], 20);
    }

    #[test]
    fn test_subscription_view() {
        let recipes = vec![recipe()];
        let view = subscription_view(&author(), &recipes, 5, &media());
        assert!(view.user.is_subscribed);
        assert_eq!(view.recipes.len(), 1);
        assert_eq!(view.recipes_count, 5);
    }

    #[test]
    fn test_subscription_views_group_batched_recipes() {
        let second = User::new(Snowflake::new(2), "baker@example.com", "baker", "пётр", "петров");
        let quiet = User::new(Snowflake::new(3), "quiet@example.com", "quiet", "ольга", "ли");

        let mut pie = recipe();
        pie.id = Snowflake::new(11);
        pie.author_id = second.id;
        let recipes = vec![recipe(), pie];
        let counts = vec![(Snowflake::new(1), 4), (Snowflake::new(2), 1)];

        let views = subscription_views(&[second, author(), quiet], recipes, counts, &media());

        assert_eq!(views.len(), 3);
        assert_eq!(views[0].user.username, "baker");
        assert_eq!(views[0].recipes.len(), 1);
        assert_eq!(views[0].recipes[0].id, Snowflake::new(11));
        assert_eq!(views[0].recipes_count, 1);
        assert_eq!(views[1].user.username, "chef");
        assert_eq!(views[1].recipes[0].id, Snowflake::new(10));
        assert_eq!(views[1].recipes_count, 4);
        assert!(views[2].recipes.is_empty());
        assert_eq!(views[2].recipes_count, 0);
    }

    #[test]
    fn test_user_created_has_no_subscription_flag() {
        let json = serde_json::to_value(UserCreatedResponse::from(&author())).unwrap();
        assert!(json.get("is_subscribed").is_none());
        assert_eq!(json["username"], "chef");
    }
}
