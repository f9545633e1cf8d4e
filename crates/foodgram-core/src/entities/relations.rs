//! User-to-user and user-to-recipe relations

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// One-directional subscription of `user_id` to `author_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Follow {
    pub user_id: Snowflake,
    pub author_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Follow {
    /// Create a follow, rejecting self-subscription
    pub fn new(user_id: Snowflake, author_id: Snowflake) -> Result<Self, DomainError> {
        if user_id == author_id {
            return Err(DomainError::CannotSubscribeToSelf);
        }
        Ok(Self {
            user_id,
            author_id,
            created_at: Utc::now(),
        })
    }
}

/// Recipe marked as a favorite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub user_id: Snowflake,
    pub recipe_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    pub fn new(user_id: Snowflake, recipe_id: Snowflake) -> Self {
        Self {
            user_id,
            recipe_id,
            created_at: Utc::now(),
        }
    }
}

/// Recipe placed in the user's shopping cart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingCartEntry {
    pub user_id: Snowflake,
    pub recipe_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl ShoppingCartEntry {
    pub fn new(user_id: Snowflake, recipe_id: Snowflake) -> Self {
        Self {
            user_id,
            recipe_id,
            created_at: Utc::now(),
        }
    }
}
