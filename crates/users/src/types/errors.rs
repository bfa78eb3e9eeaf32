//! Error types for the user store.

use thiserror::Error;

/// User-related errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserError {
    #[error("User not found")]
    UserNotFound,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Store update failed: {0}")]
    StoreUnavailable(String),
}

/// Result type for user operations
pub type UserResult<T> = Result<T, UserError>;
