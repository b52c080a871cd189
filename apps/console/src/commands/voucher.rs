//! # Voucher Commands
//!
//! Create, list, update, delete and apply vouchers.

use serde::Serialize;
use std::fmt;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::info;
use voucher_core::validation::{parse_amount, parse_uuid};
use voucher_core::{Money, VoucherType};

use crate::console::Console;
use crate::error::{ConsoleError, ConsoleResult};

/// Result of applying a voucher to a purchase.
#[derive(Debug, Clone, Serialize)]
pub struct DiscountResult {
    pub voucher_id: uuid::Uuid,
    pub purchase_amount: Money,
    pub discounted_amount: Money,
}

impl fmt::Display for DiscountResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (purchase {}, voucher {})",
            self.discounted_amount, self.purchase_amount, self.voucher_id
        )
    }
}

/// `voucher create`: prompts for type and amount, then saves the voucher.
pub async fn create<R, W>(console: &mut Console<R, W>) -> ConsoleResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let keys = console
        .factories()
        .types()
        .iter()
        .map(VoucherType::input_key)
        .collect::<Vec<_>>()
        .join("/");

    let voucher_type: VoucherType = console
        .prompt(&format!("Voucher type ({})", keys))
        .await?
        .parse()?;
    let amount = parse_amount("discount amount", &console.prompt("Discount amount").await?)?;

    let voucher = console.factories().create(voucher_type, amount)?;
    console.db().vouchers().save(&voucher).await?;

    info!(id = %voucher.id(), voucher_type = %voucher_type, amount, "Voucher created");
    console.print_entity("Created voucher", &voucher).await
}

/// `voucher list`: prints every voucher.
pub async fn list<R, W>(console: &mut Console<R, W>) -> ConsoleResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let vouchers = console.db().vouchers().find_all().await?;
    console.print_listing(&vouchers, "No vouchers.").await
}

/// `voucher update`: replaces the discount amount of an existing voucher.
///
/// The new amount is checked against the voucher's own bounds before
/// anything is written.
pub async fn update<R, W>(console: &mut Console<R, W>) -> ConsoleResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let id = parse_uuid("voucher id", &console.prompt("Voucher id").await?)?;
    let amount = parse_amount("discount amount", &console.prompt("New discount amount").await?)?;

    let mut voucher = console
        .db()
        .vouchers()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ConsoleError::not_found("Voucher", &id.to_string()))?;

    voucher.update(amount)?;
    console.db().vouchers().update(&voucher).await?;

    info!(id = %id, amount, "Voucher updated");
    console.print_entity("Updated voucher", &voucher).await
}

/// `voucher delete`: removes a voucher by id.
pub async fn delete<R, W>(console: &mut Console<R, W>) -> ConsoleResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let id = parse_uuid("voucher id", &console.prompt("Voucher id").await?)?;

    console.db().vouchers().delete(id).await?;

    info!(id = %id, "Voucher deleted");
    console.print(&format!("Deleted voucher {}", id)).await
}

/// `voucher discount`: prints what is left to pay after applying a voucher.
pub async fn discount<R, W>(console: &mut Console<R, W>) -> ConsoleResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let id = parse_uuid("voucher id", &console.prompt("Voucher id").await?)?;
    let purchase = parse_amount("purchase amount", &console.prompt("Purchase amount").await?)?;

    let voucher = console
        .db()
        .vouchers()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ConsoleError::not_found("Voucher", &id.to_string()))?;

    let purchase_amount = Money::new(purchase);
    let result = DiscountResult {
        voucher_id: voucher.id(),
        purchase_amount,
        discounted_amount: voucher.discount(purchase_amount)?,
    };
    console.print_entity("Discounted amount", &result).await
}
