//! # Money Module
//!
//! Provides the `Money` type for handling purchase amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: whole units of the smallest currency denomination        │
//! │    1000 × (100 − 15) / 100 = 850                                        │
//! │    Any remainder is dropped explicitly (see apply_percentage_discount)  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use voucher_core::money::Money;
//!
//! let price = Money::new(1000);
//! let left = price - Money::new(500);
//! assert_eq!(left.amount(), 500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction can be checked for going negative
///   instead of wrapping
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole units.
    ///
    /// ## Example
    /// ```rust
    /// use voucher_core::money::Money;
    ///
    /// let price = Money::new(1099);
    /// assert_eq!(price.amount(), 1099);
    /// ```
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Rounding
    /// The discounted amount is rounded **down**: `amount × (100 − pct) / 100`
    /// with integer division. For 999 at 15% off the exact value is 849.15,
    /// the customer pays 849.
    ///
    /// Uses i128 internally so large purchase amounts cannot overflow.
    ///
    /// ## Example
    /// ```rust
    /// use voucher_core::money::Money;
    ///
    /// let subtotal = Money::new(10000);
    /// assert_eq!(subtotal.apply_percentage_discount(10).amount(), 9000);
    /// assert_eq!(Money::new(999).apply_percentage_discount(15).amount(), 849);
    /// ```
    pub fn apply_percentage_discount(&self, percent: i64) -> Money {
        let kept = 100 - percent as i128;
        let discounted = (self.0 as i128 * kept).div_euclid(100);
        Money(discounted as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_amount() {
        let money = Money::new(1099);
        assert_eq!(money.amount(), 1099);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::new(1099)), "1099");
        assert_eq!(format!("{}", Money::new(-550)), "-550");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(1000);
        let b = Money::new(500);

        assert_eq!((a - b).amount(), 500);
        assert!(!(a - a).is_negative());
        assert!((b - a).is_negative());
    }

    #[test]
    fn test_percentage_discount() {
        assert_eq!(Money::new(10000).apply_percentage_discount(10).amount(), 9000);
        assert_eq!(Money::new(10000).apply_percentage_discount(100).amount(), 0);
        assert_eq!(Money::new(0).apply_percentage_discount(50).amount(), 0);
    }

    #[test]
    fn test_percentage_discount_rounds_down() {
        // 999 × 0.85 = 849.15
        assert_eq!(Money::new(999).apply_percentage_discount(15).amount(), 849);
        // 1 × 0.5 = 0.5
        assert_eq!(Money::new(1).apply_percentage_discount(50).amount(), 0);
    }

    #[test]
    fn test_percentage_discount_large_amount() {
        let big = Money::new(i64::MAX / 2);
        let discounted = big.apply_percentage_discount(1);
        assert!(discounted < big);
        assert!(!discounted.is_negative());
    }
}
