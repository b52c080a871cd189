//! # Voucher Factories
//!
//! One factory per voucher type, plus an explicit registry that maps each
//! [`VoucherType`] to its factory.
//!
//! ## Selection Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Console: "voucher create"  type = percent, amount = 15                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  VoucherFactories::create(PercentDiscount, 15)                          │
//! │       │                                                                 │
//! │       ├── lookup factory by type ── missing? → UnsupportedVoucherType   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PercentDiscountVoucherFactory::create_voucher(15)                      │
//! │       │                                                                 │
//! │       ├── 15 outside [1, 100]? → AmountOutOfBound                       │
//! │       │                                                                 │
//! │       └── OK → Voucher { id: v4, PercentDiscount, 15 }                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The registry is a plain value: the console builds it once at startup and
//! hands out `&VoucherFactories` to whatever needs to create vouchers.

use std::collections::HashMap;
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::voucher::{Voucher, VoucherType};

/// Builds vouchers of a single type.
pub trait VoucherFactory: Send + Sync {
    /// Creates a new voucher, validating `discount_amount` for this type.
    fn create_voucher(&self, discount_amount: i64) -> CoreResult<Voucher>;

    /// The type this factory produces.
    fn voucher_type(&self) -> VoucherType;
}

/// Factory for [`VoucherType::FixedAmount`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedAmountVoucherFactory;

impl VoucherFactory for FixedAmountVoucherFactory {
    fn create_voucher(&self, discount_amount: i64) -> CoreResult<Voucher> {
        Voucher::new(VoucherType::FixedAmount, discount_amount)
    }

    fn voucher_type(&self) -> VoucherType {
        VoucherType::FixedAmount
    }
}

/// Factory for [`VoucherType::PercentDiscount`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentDiscountVoucherFactory;

impl VoucherFactory for PercentDiscountVoucherFactory {
    fn create_voucher(&self, discount_amount: i64) -> CoreResult<Voucher> {
        Voucher::new(VoucherType::PercentDiscount, discount_amount)
    }

    fn voucher_type(&self) -> VoucherType {
        VoucherType::PercentDiscount
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Maps each voucher type to the factory that builds it.
#[derive(Default)]
pub struct VoucherFactories {
    factories: HashMap<VoucherType, Box<dyn VoucherFactory>>,
}

impl VoucherFactories {
    /// Creates an empty registry.
    pub fn new() -> Self {
        VoucherFactories::default()
    }

    /// Creates a registry with a factory for every built-in type.
    pub fn with_defaults() -> Self {
        let mut registry = VoucherFactories::new();
        registry.register(FixedAmountVoucherFactory);
        registry.register(PercentDiscountVoucherFactory);
        registry
    }

    /// Registers `factory` under the type it reports, replacing any previous one.
    pub fn register<F>(&mut self, factory: F) -> &mut Self
    where
        F: VoucherFactory + 'static,
    {
        self.factories
            .insert(factory.voucher_type(), Box::new(factory));
        self
    }

    /// Returns the factory for `voucher_type`, if registered.
    fn get(&self, voucher_type: VoucherType) -> Option<&dyn VoucherFactory> {
        self.factories.get(&voucher_type).map(|f| f.as_ref())
    }

    /// Creates a voucher through the factory registered for `voucher_type`.
    pub fn create(&self, voucher_type: VoucherType, discount_amount: i64) -> CoreResult<Voucher> {
        self.get(voucher_type)
            .ok_or(CoreError::UnsupportedVoucherType(voucher_type))?
            .create_voucher(discount_amount)
    }

    /// Registered types, in menu order.
    pub fn types(&self) -> Vec<VoucherType> {
        VoucherType::ALL
            .into_iter()
            .filter(|ty| self.factories.contains_key(ty))
            .collect()
    }
}

impl fmt::Debug for VoucherFactories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoucherFactories")
            .field("types", &self.types())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
