//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use foodgram_cache::RedisPoolError;
use foodgram_common::AppError;
use foodgram_core::DomainError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// Application error (auth, token handling)
    App(AppError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Invalid input, optionally with per-field details
    Validation {
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Validation { message, .. } => write!(f, "Validation error: {message}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            details: None,
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_validation() || e.is_business_rule() {
                    400
                } else if matches!(e, DomainError::InvalidCredentials) {
                    401
                } else if e.is_authorization() {
                    403
                } else if e.is_conflict() {
                    409
                } else {
                    500
                }
            }
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::Validation { .. } => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Field details for validation errors
    pub fn details(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Validation { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Domain(e) => Self::Domain(e),
            other => Self::App(other),
        }
    }
}

impl From<RedisPoolError> for ServiceError {
    fn from(err: RedisPoolError) -> Self {
        Self::Domain(DomainError::CacheError(err.to_string()))
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation {
            message: "Invalid request body".to_string(),
            details: serde_json::to_value(&errors).ok(),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use foodgram_core::Snowflake;
    use validator::Validate;

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("Recipe", "123");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.to_string().contains("Recipe not found: 123"));
    }

    #[test]
    fn test_domain_status_codes() {
        let status = |e: DomainError| ServiceError::from(e).status_code();
        assert_eq!(status(DomainError::RecipeNotFound(Snowflake::new(1))), 404);
        assert_eq!(status(DomainError::InvalidImage("x".into())), 400);
        assert_eq!(status(DomainError::AlreadyFavorited), 400);
        assert_eq!(status(DomainError::NotInShoppingCart), 400);
        assert_eq!(status(DomainError::InvalidCredentials), 401);
        assert_eq!(status(DomainError::NotRecipeAuthor), 403);
        assert_eq!(status(DomainError::UsernameAlreadyExists), 409);
        assert_eq!(status(DomainError::ResourceUnavailable("font".into())), 500);
    }

    #[test]
    fn test_app_domain_errors_are_unwrapped() {
        let err = ServiceError::from(AppError::Domain(DomainError::WeakPassword("short".into())));
        assert!(matches!(err, ServiceError::Domain(DomainError::WeakPassword(_))));
        assert_eq!(ServiceError::from(AppError::TokenExpired).status_code(), 401);
    }

    #[test]
    fn test_redis_errors_are_cache_errors() {
        let err = ServiceError::from(RedisPoolError::InvalidTtl(1));
        assert_eq!(err.error_code(), "CACHE_ERROR");
        assert_eq!(err.status_code(), 500);
    }

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1))]
        name: String,
    }

    #[test]
    fn test_validation_errors_carry_details() {
        let errors = Probe {
            name: String::new(),
        }
        .validate()
        .unwrap_err();
        let err = ServiceError::from(errors);

        assert_eq!(err.status_code(), 400);
        assert!(err.details().unwrap().get("name").is_some());
    }
}
