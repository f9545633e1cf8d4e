//! Error handling utilities for repositories

use foodgram_core::error::DomainError;
use foodgram_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Map a violated unique constraint on `users` to the matching conflict
pub fn map_user_conflict(e: SqlxError) -> DomainError {
    let constraint = e
        .as_database_error()
        .and_then(|db_err| db_err.constraint())
        .map(str::to_owned);
    map_unique_violation(e, || match constraint.as_deref() {
        Some(name) if name.contains("username") => DomainError::UsernameAlreadyExists,
        _ => DomainError::EmailAlreadyExists,
    })
}

/// Map a foreign key violation (unknown ingredient or tag) to a validation error
pub fn map_reference_violation(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return DomainError::ValidationError(
                "recipe references an unknown ingredient or tag".to_string(),
            );
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: Snowflake) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "recipe not found" error
pub fn recipe_not_found(id: Snowflake) -> DomainError {
    DomainError::RecipeNotFound(id)
}

/// Raw ids for `= ANY($1)` binds
pub fn raw_ids(ids: &[Snowflake]) -> Vec<i64> {
    ids.iter().map(|id| id.into_inner()).collect()
}
