//! # Vouchers
//!
//! A voucher is a discount rule applied to a purchase amount.
//!
//! ## Variants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Voucher Variants                                 │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │   VoucherType::FixedAmount   │   │ VoucherType::PercentDiscount │   │
//! │  │  ──────────────────────────  │   │  ──────────────────────────  │   │
//! │  │  amount in [1, 10000]        │   │  amount in [1, 100]          │   │
//! │  │  purchase − amount           │   │  purchase × (100 − p) / 100  │   │
//! │  │  never below zero            │   │  rounded down                │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  Every rule is selected by matching on the tag. A new variant is a     │
//! │  new tag arm in each match below plus a factory in `factory.rs`.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariant
//! A `Voucher` can only be built through [`Voucher::new`] or
//! [`Voucher::with_id`], both of which validate. [`Voucher::update`] validates
//! before writing, so the stored amount is always within bounds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

// =============================================================================
// Voucher Type
// =============================================================================

/// Identifies which discount rule a voucher applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum VoucherType {
    /// Subtracts a flat amount.
    FixedAmount,
    /// Removes a percentage of the purchase amount.
    PercentDiscount,
}

impl VoucherType {
    /// All known voucher types, in menu order.
    pub const ALL: [VoucherType; 2] = [VoucherType::FixedAmount, VoucherType::PercentDiscount];

    /// Smallest accepted discount amount.
    pub const fn min_amount(&self) -> i64 {
        match self {
            VoucherType::FixedAmount => 1,
            VoucherType::PercentDiscount => 1,
        }
    }

    /// Largest accepted discount amount.
    pub const fn max_amount(&self) -> i64 {
        match self {
            VoucherType::FixedAmount => 10_000,
            VoucherType::PercentDiscount => 100,
        }
    }

    /// Name reported in bound violations.
    pub const fn variant_name(&self) -> &'static str {
        match self {
            VoucherType::FixedAmount => "FixedAmountVoucher",
            VoucherType::PercentDiscount => "PercentDiscountVoucher",
        }
    }

    /// Stable storage/serialization key.
    pub const fn as_str(&self) -> &'static str {
        match self {
            VoucherType::FixedAmount => "fixed_amount",
            VoucherType::PercentDiscount => "percent_discount",
        }
    }

    /// Short keyword typed at the console prompt.
    pub const fn input_key(&self) -> &'static str {
        match self {
            VoucherType::FixedAmount => "fixed",
            VoucherType::PercentDiscount => "percent",
        }
    }

    /// Checks `amount` against this type's bounds.
    ///
    /// ## Example
    /// ```rust
    /// use voucher_core::VoucherType;
    ///
    /// assert!(VoucherType::FixedAmount.validate(10_000).is_ok());
    /// assert!(VoucherType::FixedAmount.validate(10_001).is_err());
    /// assert!(VoucherType::PercentDiscount.validate(0).is_err());
    /// ```
    pub fn validate(&self, amount: i64) -> CoreResult<()> {
        let (min, max) = (self.min_amount(), self.max_amount());
        if amount < min || amount > max {
            warn!(
                voucher = self.variant_name(),
                amount, min, max, "Discount amount out of bound"
            );
            return Err(CoreError::AmountOutOfBound {
                voucher: self.variant_name(),
                amount,
                min,
                max,
            });
        }
        Ok(())
    }

    /// Applies this rule to `purchase` with an already-validated `amount`.
    fn apply(&self, amount: i64, purchase: Money) -> CoreResult<Money> {
        if purchase.is_negative() {
            return Err(CoreError::InvalidPurchaseAmount(purchase.amount()));
        }

        match self {
            VoucherType::FixedAmount => {
                let discounted = purchase - Money::new(amount);
                if discounted.is_negative() {
                    return Err(CoreError::InsufficientAmount {
                        purchase: purchase.amount(),
                        discount: amount,
                    });
                }
                Ok(discounted)
            }
            VoucherType::PercentDiscount => Ok(purchase.apply_percentage_discount(amount)),
        }
    }
}

impl fmt::Display for VoucherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses console input and stored keys.
///
/// Accepts the short key (`fixed`), the storage key (`fixed_amount`) or the
/// menu number (`1`), case-insensitively.
impl FromStr for VoucherType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        VoucherType::ALL
            .iter()
            .enumerate()
            .find(|(idx, ty)| {
                s == ty.input_key() || s == ty.as_str() || s == (idx + 1).to_string()
            })
            .map(|(_, ty)| *ty)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "voucher type".to_string(),
                allowed: VoucherType::ALL
                    .iter()
                    .map(|ty| ty.input_key().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Voucher
// =============================================================================

/// A discount voucher.
///
/// Fields are private so the amount can only change through [`Voucher::update`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voucher {
    id: Uuid,
    voucher_type: VoucherType,
    discount_amount: i64,
}

impl Voucher {
    /// Creates a voucher with a fresh UUID v4.
    pub fn new(voucher_type: VoucherType, discount_amount: i64) -> CoreResult<Self> {
        Voucher::with_id(Uuid::new_v4(), voucher_type, discount_amount)
    }

    /// Creates a voucher with a known id (e.g. when loading from storage).
    pub fn with_id(id: Uuid, voucher_type: VoucherType, discount_amount: i64) -> CoreResult<Self> {
        voucher_type.validate(discount_amount)?;
        Ok(Voucher {
            id,
            voucher_type,
            discount_amount,
        })
    }

    /// Checks an amount against this voucher's bounds without changing it.
    pub fn validate(&self, amount: i64) -> CoreResult<()> {
        self.voucher_type.validate(amount)
    }

    /// Returns the amount left to pay after applying this voucher.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidPurchaseAmount`] for a negative purchase
    /// - [`CoreError::InsufficientAmount`] when a fixed discount exceeds the
    ///   purchase (the result is never clamped to zero)
    ///
    /// ## Example
    /// ```rust
    /// use voucher_core::{Money, Voucher, VoucherType};
    ///
    /// let voucher = Voucher::new(VoucherType::FixedAmount, 500).unwrap();
    /// assert_eq!(voucher.discount(Money::new(800)).unwrap(), Money::new(300));
    /// assert!(voucher.discount(Money::new(300)).is_err());
    /// ```
    pub fn discount(&self, purchase: Money) -> CoreResult<Money> {
        self.voucher_type.apply(self.discount_amount, purchase)
    }

    /// Replaces the discount amount after validating it.
    ///
    /// On failure the previous amount is kept.
    pub fn update(&mut self, discount_amount: i64) -> CoreResult<()> {
        self.validate(discount_amount)?;
        self.discount_amount = discount_amount;
        Ok(())
    }

    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    pub fn voucher_type(&self) -> VoucherType {
        self.voucher_type
    }

    #[inline]
    pub fn discount_amount(&self) -> i64 {
        self.discount_amount
    }
}

impl fmt::Display for Voucher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.voucher_type {
            VoucherType::FixedAmount => write!(
                f,
                "{} | {} | {} off",
                self.id, self.voucher_type, self.discount_amount
            ),
            VoucherType::PercentDiscount => write!(
                f,
                "{} | {} | {}% off",
                self.id, self.voucher_type, self.discount_amount
            ),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
