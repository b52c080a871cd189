//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)          UPDATE/DELETE matched 0 rows       │
//! │       │                                        │                        │
//! │       ▼                                        ▼                        │
//! │  DbError (this module) ◄──────────── DbError::DataModifying             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ConsoleError (in app) ← printed, user returns to the prompt            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing row on a *read* is not an error: repositories return `Ok(None)`.

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An update or delete affected zero rows.
    ///
    /// ## When This Occurs
    /// - Updating a customer/voucher whose id was never saved
    /// - Deleting by an id or name that doesn't exist
    #[error("Failed to {operation} {entity}: no row matched {key}")]
    DataModifying {
        entity: String,
        operation: String,
        key: String,
    },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Saving an entity whose id already exists
    /// - Saving or renaming a customer to a name that is taken
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// A stored row could not be turned back into a domain value.
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created
    /// - File permissions issue
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
    /// Creates a DataModifying error for an update/delete that matched nothing.
    pub fn data_modifying(
        entity: impl Into<String>,
        operation: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        DbError::DataModifying {
            entity: entity.into(),
            operation: operation.into(),
            key: key.into(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Fills in the offending value of a UniqueViolation.
    ///
    /// SQLite only reports the column (`customers.name`), so the repository
    /// supplies the value it tried to write. Other errors pass through.
    pub fn with_duplicate_value(self, value_for: impl FnOnce(&str) -> String) -> Self {
        match self {
            DbError::UniqueViolation { field, .. } => {
                let value = value_for(&field);
                DbError::UniqueViolation { field, value }
            }
            other => other,
        }
    }

    /// True for the "target did not exist" write failure.
    pub fn is_data_modifying(&self) -> bool {
        matches!(self, DbError::DataModifying { .. })
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// sqlx::Error::ColumnDecode   → DbError::CorruptRow
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite: "UNIQUE constraint failed: <table>.<column>"
                if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::UniqueViolation {
                        field: field.to_string(),
                        value: "unknown".to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                DbError::CorruptRow(err.to_string())
            }

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
