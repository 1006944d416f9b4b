//! # Error Types
//!
//! Validation error types for fruit-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fruit-core errors (this file)                                         │
//! │  ├── ValidationError   - One field-level failure                       │
//! │  └── ValidationErrors  - Every failure found in one input              │
//! │                                                                         │
//! │  fruit-db errors (separate crate)                                      │
//! │  └── DbError           - Storage and row-mapping failures              │
//! │                                                                         │
//! │  fruit-service errors                                                  │
//! │  └── ServiceError      - What UI glue sees                             │
//! │                                                                         │
//! │  Flow: ValidationError → ValidationErrors → ServiceError               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, id, values)
//! 3. Errors are typed values, never String

use std::fmt;

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// A single input validation failure.
///
/// Always recoverable by the caller correcting the input. Never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field has the wrong JSON type (e.g. a number where text is expected).
    #[error("{field} must be a {expected}")]
    InvalidType { field: String, expected: String },

    /// Field does not parse as a finite real number.
    #[error("{field} must be a valid number")]
    InvalidNumber { field: String },

    /// Field does not parse as an integer.
    #[error("{field} must be a valid integer")]
    InvalidInteger { field: String },

    /// Numeric value is below zero.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Record identifiers are positive integers.
    #[error("id must be a positive integer, got {id}")]
    InvalidId { id: i64 },

    /// Price range bounds are the wrong way round.
    #[error("minimum price cannot be greater than maximum price ({min} > {max})")]
    PriceRangeInverted { min: f64, max: f64 },

    /// A relative stock change would push the quantity below zero.
    ///
    /// ## User Workflow
    /// ```text
    /// Stock: 100, adjustment: -150
    ///      │
    ///      ▼
    /// NegativeQuantity { current: 100, delta: -150 }
    ///      │
    ///      ▼
    /// UI shows: "stock adjustment would result in negative quantity: 100 + -150"
    /// ```
    #[error("stock adjustment would result in negative quantity: {current} + {delta}")]
    NegativeQuantity { current: i64, delta: i64 },
}

impl ValidationError {
    /// Creates a Required error.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates a TooShort error.
    pub fn too_short(field: impl Into<String>, min: usize) -> Self {
        ValidationError::TooShort {
            field: field.into(),
            min,
        }
    }

    /// Creates a Negative error.
    pub fn negative(field: impl Into<String>) -> Self {
        ValidationError::Negative {
            field: field.into(),
        }
    }

    /// Name of the offending field, when the failure is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::InvalidType { field, .. }
            | ValidationError::InvalidNumber { field }
            | ValidationError::InvalidInteger { field }
            | ValidationError::Negative { field } => Some(field),
            ValidationError::InvalidId { .. } => Some("id"),
            ValidationError::PriceRangeInverted { .. } => Some("price"),
            ValidationError::NegativeQuantity { .. } => Some("quantity"),
        }
    }
}

// =============================================================================
// Validation Errors (collection)
// =============================================================================

/// Every validation failure found in one input.
///
/// Create/update validation does not stop at the first bad field: the
/// caller gets the whole list so a form can flag all of them at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        ValidationErrors(Vec::new())
    }

    /// Records another failure.
    pub fn push(&mut self, err: ValidationError) {
        self.0.push(err);
    }

    /// Records the error side of `result`, passing the value through.
    pub fn collect<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(err);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Returns true if any failure concerns `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.iter().any(|e| e.field() == Some(field))
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        ValidationErrors(vec![err])
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result type for single-field validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
