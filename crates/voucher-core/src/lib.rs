//! # voucher-core: Pure Business Logic for Voucher Desk
//!
//! This crate holds every business rule of Voucher Desk as pure functions and
//! plain data types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Voucher Desk Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Console (apps/console)                        │   │
//! │  │     reads a command ──► dispatches ──► prints the result        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ voucher-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  voucher  │  │  factory  │  │   types   │  │ validation│  │   │
//! │  │   │  Voucher  │  │ registry  │  │ Customer  │  │   rules   │  │   │
//! │  │   │   Type    │  │ per type  │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CONSOLE • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   voucher-db (Database Layer)                   │   │
//! │  │             SQLite queries, migrations, repositories            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`voucher`] - `Voucher` and `VoucherType` (discount rules and bounds)
//! - [`factory`] - One factory per voucher type plus the `VoucherFactories` registry
//! - [`types`] - Domain records (`Customer`)
//! - [`money`] - Integer money type (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation helpers
//!
//! ## Example Usage
//!
//! ```rust
//! use voucher_core::{Money, VoucherFactories, VoucherType};
//!
//! let factories = VoucherFactories::with_defaults();
//! let voucher = factories.create(VoucherType::FixedAmount, 500).unwrap();
//!
//! let paid = voucher.discount(Money::new(1200)).unwrap();
//! assert_eq!(paid.amount(), 700);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod factory;
pub mod money;
pub mod types;
pub mod validation;
pub mod voucher;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use factory::{
    FixedAmountVoucherFactory, PercentDiscountVoucherFactory, VoucherFactories, VoucherFactory,
};
pub use money::Money;
pub use types::Customer;
pub use voucher::{Voucher, VoucherType};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a customer name (after trimming).
pub const MAX_CUSTOMER_NAME_LEN: usize = 50;
