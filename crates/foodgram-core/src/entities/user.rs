//! User entity - an account that can author recipes and follow other users

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Maximum username length
pub const USERNAME_MAX_LEN: usize = 150;

/// Maximum email length
pub const EMAIL_MAX_LEN: usize = 254;

/// Username reserved for the `/users/me` route
const RESERVED_USERNAME: &str = "me";

/// Registered account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with normalized fields.
    ///
    /// Email and username are lowercased; first and last name are capitalized.
    pub fn new(
        id: Snowflake,
        email: &str,
        username: &str,
        first_name: &str,
        last_name: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            email: email.trim().to_lowercase(),
            username: username.trim().to_lowercase(),
            first_name: capitalize(first_name.trim()),
            last_name: capitalize(last_name.trim()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check a candidate username: word characters plus `.@+-`, not `me`.
    pub fn validate_username(username: &str) -> Result<(), DomainError> {
        let lowered = username.to_lowercase();
        if lowered.is_empty() || lowered.chars().count() > USERNAME_MAX_LEN {
            return Err(DomainError::InvalidUsername(format!(
                "must be between 1 and {USERNAME_MAX_LEN} characters"
            )));
        }
        if !lowered
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-'))
        {
            return Err(DomainError::InvalidUsername(
                "only letters, digits and . @ + - _ are allowed".to_string(),
            ));
        }
        if lowered == RESERVED_USERNAME {
            return Err(DomainError::InvalidUsername(
                "'me' cannot be used as a username".to_string(),
            ));
        }
        Ok(())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Update the display names
    pub fn set_names(&mut self, first_name: &str, last_name: &str) {
        self.first_name = capitalize(first_name.trim());
        self.last_name = capitalize(last_name.trim());
        self.updated_at = Utc::now();
    }
}

/// Upper-case the first character and lower-case the rest
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
