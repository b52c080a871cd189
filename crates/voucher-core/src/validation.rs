//! # Validation Module
//!
//! Input validation utilities for Voucher Desk.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console (apps/console)                                        │
//! │  └── Parsing raw lines into numbers / UUIDs / voucher types             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Domain (Rust)                                                 │
//! │  ├── THIS MODULE: names, ids, numeric input                             │
//! │  └── VoucherType::validate: discount bounds                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── PRIMARY KEY / UNIQUE constraints                                   │
//! │  └── CHECK constraints on voucher_type                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use uuid::Uuid;

use crate::error::ValidationError;
use crate::MAX_CUSTOMER_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 50 characters
///
/// ## Example
/// ```rust
/// use voucher_core::validation::validate_customer_name;
///
/// assert_eq!(validate_customer_name("  test ").unwrap(), "test");
/// assert!(validate_customer_name("").is_err());
/// ```
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_CUSTOMER_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_CUSTOMER_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Parsing Validators
// =============================================================================

/// Parses a UUID typed by the user.
///
/// ## Example
/// ```rust
/// use voucher_core::validation::parse_uuid;
///
/// assert!(parse_uuid("id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(parse_uuid("id", "not-a-uuid").is_err());
/// ```
pub fn parse_uuid(field: &str, input: &str) -> ValidationResult<Uuid> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Uuid::parse_str(input).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })
}

/// Parses a whole number typed by the user.
///
/// Bounds are not checked here; voucher bounds belong to `VoucherType`.
pub fn parse_amount(field: &str, input: &str) -> ValidationResult<i64> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    input
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a whole number".to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_customer_name() {
        assert_eq!(validate_customer_name("test").unwrap(), "test");
        assert_eq!(validate_customer_name("  new_name  ").unwrap(), "new_name");

        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name("   ").is_err());
        assert!(validate_customer_name(&"a".repeat(51)).is_err());
        assert!(validate_customer_name(&"a".repeat(50)).is_ok());
    }

    #[test]
    fn test_validate_customer_name_counts_chars_not_bytes() {
        // 20 Hangul syllables = 60 bytes in UTF-8
        assert!(validate_customer_name(&"가".repeat(20)).is_ok());
    }

    #[test]
    fn test_parse_uuid() {
        assert!(parse_uuid("id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(matches!(
            parse_uuid("id", ""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_uuid("id", "123"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("amount", " 500 ").unwrap(), 500);
        assert_eq!(parse_amount("amount", "-3").unwrap(), -3);
        assert!(parse_amount("amount", "").is_err());
        assert!(parse_amount("amount", "12.5").is_err());
        assert!(parse_amount("amount", "abc").is_err());
    }
}
