//! # Repository Module
//!
//! Database repository implementations for Voucher Desk.
//!
//! ## Repository Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Shared by CustomerRepository / VoucherRepository           │
//! │                                                                         │
//! │  save(entity)        INSERT       id taken?      → UniqueViolation      │
//! │  find_by_id(id)      SELECT       no row?        → Ok(None)             │
//! │  find_all()          SELECT       empty table?   → Ok(vec![])           │
//! │  update(entity)      UPDATE       0 rows?        → DataModifying        │
//! │  delete(id)          DELETE       0 rows?        → DataModifying        │
//! │                                                                         │
//! │  Every call is one statement on one pooled connection.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`](customer::CustomerRepository) - Customer CRUD, lookup/delete by name
//! - [`VoucherRepository`](voucher::VoucherRepository) - Voucher CRUD, lookup by type

pub mod customer;
pub mod voucher;

use sqlx::sqlite::SqliteQueryResult;

use crate::error::{DbError, DbResult};

/// Turns a zero affected-row count into [`DbError::DataModifying`].
pub(crate) fn expect_affected(
    result: SqliteQueryResult,
    entity: &str,
    operation: &str,
    key: impl FnOnce() -> String,
) -> DbResult<u64> {
    match result.rows_affected() {
        0 => Err(DbError::data_modifying(entity, operation, key())),
        n => Ok(n),
    }
}
