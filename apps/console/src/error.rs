//! # Console Error Type
//!
//! Unified error type for console commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Voucher Desk                           │
//! │                                                                         │
//! │  Command handler                                                        │
//! │  Result<(), ConsoleError>                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Bad input?        ─── ValidationError ───────┐                         │
//! │  Rule violated?    ─── CoreError ─────────────┤                         │
//! │  Row missing?      ─── DbError::DataModifying ┼──► ConsoleError         │
//! │  SQLite failure?   ─── DbError::QueryFailed ──┘        │                │
//! │                                                        ▼                │
//! │                                   "[VALIDATION_ERROR] amount is required"│
//! │                                                        │                │
//! │                                                        ▼                │
//! │                                           back to the command prompt    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! In JSON output mode the same error is printed as
//! `{"code":"NOT_FOUND","message":"..."}`.

use serde::Serialize;
use std::fmt;
use tracing::error;
use voucher_core::{CoreError, ValidationError};
use voucher_db::DbError;

use crate::config::ConfigError;

/// Result type for console operations.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Error returned from console commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsoleError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes printed in front of every error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown command
    UnknownCommand,

    /// Lookup found nothing
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Discount cannot be applied
    BusinessLogic,

    /// Update/delete matched no row
    DataModifying,

    /// Id or name already taken
    Duplicate,

    /// Database operation failed
    DatabaseError,

    /// Startup configuration invalid
    ConfigError,

    /// Reading input or writing output failed
    IoError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UnknownCommand => "UNKNOWN_COMMAND",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::BusinessLogic => "BUSINESS_LOGIC",
            ErrorCode::DataModifying => "DATA_MODIFYING",
            ErrorCode::Duplicate => "DUPLICATE",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::IoError => "IO_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConsoleError {
    /// Creates a new console error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ConsoleError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, key: &str) -> Self {
        ConsoleError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, key))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ConsoleError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an unknown command error.
    pub fn unknown_command(input: &str) -> Self {
        ConsoleError::new(
            ErrorCode::UnknownCommand,
            format!("Unknown command '{}', type 'help' for the menu", input),
        )
    }
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ConsoleError {}

/// Converts database errors to console errors.
impl From<DbError> for ConsoleError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::DataModifying { .. } => {
                ConsoleError::new(ErrorCode::DataModifying, err.to_string())
            }
            DbError::UniqueViolation { field, value } => ConsoleError::new(
                ErrorCode::Duplicate,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::CorruptRow(e) => {
                error!("Corrupt row: {}", e);
                ConsoleError::new(ErrorCode::DatabaseError, "Stored data could not be read")
            }
            DbError::ConnectionFailed(e) => {
                error!("Database connection failed: {}", e);
                ConsoleError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                error!("Database migration failed: {}", e);
                ConsoleError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but print a generic message
                error!("Database query failed: {}", e);
                ConsoleError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                error!("Database pool exhausted");
                ConsoleError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                error!("Internal database error: {}", e);
                ConsoleError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to console errors.
impl From<CoreError> for ConsoleError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AmountOutOfBound { .. }
            | CoreError::InvalidPurchaseAmount(_)
            | CoreError::UnsupportedVoucherType(_) => ConsoleError::validation(err.to_string()),
            CoreError::InsufficientAmount { .. } => {
                ConsoleError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ConsoleError {
    fn from(err: ValidationError) -> Self {
        ConsoleError::validation(err.to_string())
    }
}

impl From<ConfigError> for ConsoleError {
    fn from(err: ConfigError) -> Self {
        ConsoleError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<std::io::Error> for ConsoleError {
    fn from(err: std::io::Error) -> Self {
        error!("Console I/O failed: {}", err);
        ConsoleError::new(ErrorCode::IoError, err.to_string())
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        ConsoleError::new(ErrorCode::IoError, err.to_string())
    }
}
