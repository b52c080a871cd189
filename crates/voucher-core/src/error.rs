//! # Error Types
//!
//! Domain-specific error types for voucher-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  voucher-core errors (this file)                                        │
//! │  ├── CoreError        - Discount rule and bound violations              │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  voucher-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                     │
//! │                                                                         │
//! │  Console errors (in app)                                                │
//! │  └── ConsoleError     - What the user sees                              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                   │
//! │                          DbError  ──┴─► ConsoleError → printed          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::voucher::VoucherType;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Discount amount outside the variant's bounds.
    ///
    /// ## When This Occurs
    /// - Creating a fixed-amount voucher worth more than 10000
    /// - Updating a percent voucher to 0% or above 100%
    ///
    /// The voucher keeps its previous amount when an update fails.
    #[error("{voucher}: discount amount {amount} is out of bound [{min}, {max}]")]
    AmountOutOfBound {
        voucher: &'static str,
        amount: i64,
        min: i64,
        max: i64,
    },

    /// Applying the voucher would push the purchase amount below zero.
    #[error("Purchase amount {purchase} is smaller than the discount {discount}")]
    InsufficientAmount { purchase: i64, discount: i64 },

    /// Purchase amounts are never negative.
    #[error("Invalid purchase amount: {0}")]
    InvalidPurchaseAmount(i64),

    /// No factory is registered for the requested voucher type.
    #[error("No voucher factory registered for {0}")]
    UnsupportedVoucherType(VoucherType),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., invalid UUID, not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::AmountOutOfBound {
            voucher: "FixedAmountVoucher",
            amount: 15000,
            min: 1,
            max: 10000,
        };
        assert_eq!(
            err.to_string(),
            "FixedAmountVoucher: discount amount 15000 is out of bound [1, 10000]"
        );

        let err = CoreError::InsufficientAmount {
            purchase: 300,
            discount: 500,
        };
        assert_eq!(
            err.to_string(),
            "Purchase amount 300 is smaller than the discount 500"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 50,
        };
        assert_eq!(err.to_string(), "name must be at most 50 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
