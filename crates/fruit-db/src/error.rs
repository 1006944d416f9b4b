//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)          Row breaks a record invariant     │
//! │       │                                        │                        │
//! │       ▼                                        ▼                        │
//! │  DbError (this module) ── storage ──┬── DbError::Mapping               │
//! │       │                             │                                   │
//! │       ▼                             ▼                                   │
//! │  ServiceError::Repository (fruit-service)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UI glue displays message                                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Families
//! - **Storage**: the medium is unavailable or a write failed.
//! - **Mapping**: a row could not be turned into a record (schema drift,
//!   corrupt data). Treated as a data-integrity problem, never retried.

use thiserror::Error;

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// A persisted row could not be converted to or from a record.
    ///
    /// ## When This Occurs
    /// - Column missing or of an unexpected type
    /// - Stored value breaks a record invariant (negative quantity, ...)
    /// - Lookup on a field name the table doesn't have
    #[error("Failed to map {entity}: {reason}")]
    Mapping { entity: String, reason: String },

    /// A table constraint rejected the write.
    ///
    /// ## When This Occurs
    /// - CHECK (price >= 0) / CHECK (quantity >= 0)
    /// - NOT NULL / UNIQUE violations
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a Mapping error for a given entity type.
    pub fn mapping(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        DbError::Mapping {
            entity: entity.into(),
            reason: reason.into(),
        }
    }

    /// True for row/record conversion failures.
    pub fn is_mapping(&self) -> bool {
        matches!(self, DbError::Mapping { .. })
    }

    /// True for failures of the storage medium itself.
    pub fn is_storage(&self) -> bool {
        !self.is_mapping()
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::ColumnDecode   → DbError::Mapping
/// sqlx::Error::ColumnNotFound → DbError::Mapping
/// sqlx::Error::Decode         → DbError::Mapping
/// sqlx::Error::Database       → ConstraintViolation / QueryFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { index, source } => {
                DbError::mapping("row", format!("column {index}: {source}"))
            }

            sqlx::Error::ColumnNotFound(column) => {
                DbError::mapping("row", format!("column not found: {column}"))
            }

            sqlx::Error::Decode(source) => DbError::mapping("row", source.to_string()),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite reports constraint failures as
                // "CHECK constraint failed: ...", "NOT NULL constraint failed: ..."
                if msg.contains("constraint failed") {
                    DbError::ConstraintViolation(msg.to_string())
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::Io(e) => DbError::ConnectionFailed(e.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let err = DbError::mapping("Fruit", "quantity -1 is negative");
        assert!(err.is_mapping());
        assert!(!err.is_storage());
        assert_eq!(
            err.to_string(),
            "Failed to map Fruit: quantity -1 is negative"
        );

        assert!(DbError::PoolExhausted.is_storage());
    }

    #[test]
    fn test_from_sqlx_column_not_found() {
        let err: DbError = sqlx::Error::ColumnNotFound("price".to_string()).into();
        assert!(err.is_mapping());
    }

    #[test]
    fn test_from_sqlx_pool_errors() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
    }
}
