//! # Console Commands Module
//!
//! Handlers behind each menu entry.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── voucher.rs   ◄─── voucher create/list/update/delete/discount
//! └── customer.rs  ◄─── customer create/list/find/rename/delete
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Console Command Flow                                 │
//! │                                                                         │
//! │  > voucher create                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::voucher::create(console)                                     │
//! │         │                                                               │
//! │         ├── console.prompt("Voucher type (fixed/percent)")              │
//! │         ├── console.prompt("Discount amount")                           │
//! │         ├── console.factories().create(type, amount)                    │
//! │         ├── console.db().vouchers().save(&voucher)                      │
//! │         ▼                                                               │
//! │  console.print_entity("Created voucher", &voucher)                      │
//! │                                                                         │
//! │  Any error bubbles up as ConsoleError and is printed by the loop.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod customer;
pub mod voucher;
