//! # Service Error Type
//!
//! Unified error type for [`FruitService`](crate::FruitService) operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Fruit Store                        │
//! │                                                                         │
//! │  FruitService::create(fields)                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Validation failed? ─── ValidationErrors ──► ServiceError::Validation  │
//! │         │                  (nothing written)                            │
//! │         ▼                                                               │
//! │  Storage failed?   ─── DbError ───────────► ServiceError::Repository   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Ok(Fruit) / Ok(None) when the id doesn't exist                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use fruit_core::{ValidationError, ValidationErrors};
use fruit_db::DbError;

/// Failure of a service operation.
///
/// Not-found is never an error: lookups return `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Input was rejected before reaching storage.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// The repository failed (storage or row mapping).
    #[error("Repository error: {0}")]
    Repository(#[from] DbError),
}

impl ServiceError {
    /// True when the caller's input was at fault.
    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Validation(_))
    }

    /// The individual validation failures, if this is a validation error.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ServiceError::Validation(errors) => Some(errors),
            ServiceError::Repository(_) => None,
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(errors)
    }
}

impl From<ValidationError> for ServiceError {
    fn from(error: ValidationError) -> Self {
        ServiceError::Validation(error.into())
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_keeps_messages() {
        let err: ServiceError = ValidationError::negative("price").into();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation failed: price cannot be negative");
        assert!(err.validation_errors().unwrap().has_field("price"));
    }

    #[test]
    fn test_repository_error() {
        let err: ServiceError = DbError::PoolExhausted.into();
        assert!(!err.is_validation());
        assert!(err.validation_errors().is_none());
        assert_eq!(err.to_string(), "Repository error: Connection pool exhausted");
    }
}
