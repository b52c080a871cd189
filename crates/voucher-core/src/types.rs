//! # Domain Types
//!
//! Plain records used throughout Voucher Desk.
//!
//! ## Customer
//! ```text
//! ┌─────────────────────────┐
//! │        Customer         │
//! │  ─────────────────────  │
//! │  id (UUID, immutable)   │
//! │  created_at (immutable) │
//! │  name (mutable, unique) │
//! └─────────────────────────┘
//! ```
//!
//! Timestamps are truncated to milliseconds when a customer is created so a
//! value read back from storage compares equal to the one that was saved.

use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::validation::{validate_customer_name, ValidationResult};

// =============================================================================
// Customer
// =============================================================================

/// A customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    id: Uuid,
    created_at: DateTime<Utc>,
    name: String,
}

impl Customer {
    /// Creates a new customer with a fresh id and the current time.
    pub fn new(name: &str) -> ValidationResult<Self> {
        Customer::with_id(Uuid::new_v4(), name)
    }

    /// Creates a customer with a known id, stamped with the current time.
    pub fn with_id(id: Uuid, name: &str) -> ValidationResult<Self> {
        Customer::from_parts(id, Utc::now(), name)
    }

    /// Rebuilds a customer from every field (e.g. when loading from storage).
    pub fn from_parts(id: Uuid, created_at: DateTime<Utc>, name: &str) -> ValidationResult<Self> {
        Ok(Customer {
            id,
            created_at: created_at.trunc_subsecs(3),
            name: validate_customer_name(name)?,
        })
    }

    /// Renames the customer in place. The old name is kept on failure.
    ///
    /// The change is in memory only; persist it with the repository's `update`.
    pub fn update_name(&mut self, name: &str) -> ValidationResult<()> {
        self.name = validate_customer_name(name)?;
        Ok(())
    }

    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | joined {}",
            self.id,
            self.name,
            self.created_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_new_customer() {
        let customer = Customer::new("test").unwrap();
        assert_eq!(customer.name(), "test");
        assert_eq!(customer.created_at().nanosecond() % 1_000_000, 0);
    }

    #[test]
    fn test_new_customer_rejects_blank_name() {
        assert!(Customer::new("   ").is_err());
    }

    #[test]
    fn test_update_name() {
        let mut customer = Customer::new("test").unwrap();
        let id = customer.id();
        let created_at = customer.created_at();

        customer.update_name("new_name").unwrap();
        assert_eq!(customer.name(), "new_name");
        assert_eq!(customer.id(), id);
        assert_eq!(customer.created_at(), created_at);
    }

    #[test]
    fn test_update_name_failure_keeps_old_name() {
        let mut customer = Customer::new("test").unwrap();
        assert!(customer.update_name("").is_err());
        assert_eq!(customer.name(), "test");
    }

    #[test]
    fn test_from_parts_truncates_to_millis() {
        let at = DateTime::parse_from_rfc3339("2024-05-01T10:20:30.123456789Z")
            .unwrap()
            .with_timezone(&Utc);
        let customer = Customer::from_parts(Uuid::nil(), at, "test").unwrap();
        assert_eq!(customer.created_at().nanosecond(), 123_000_000);
    }
}
