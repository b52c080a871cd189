//! # Seed Data Generator
//!
//! Populates the database with customers and vouchers for development.
//!
//! ## Usage
//! ```bash
//! # 20 customers and 40 vouchers (default)
//! cargo run -p voucher-db --bin seed
//!
//! # Custom amounts
//! cargo run -p voucher-db --bin seed -- --customers 100 --vouchers 500
//!
//! # Wipe existing rows first
//! cargo run -p voucher-db --bin seed -- --db ./data/voucher.db --reset
//! ```
//!
//! ## Generated Data
//! - Customers: `{first} {last}` names, with a numeric suffix once the
//!   name pairs run out so names stay unique
//! - Vouchers: alternating fixed amount (100 - 5,000) and percent
//!   discount (5 - 50) vouchers, deterministic per index

use clap::Parser;
use voucher_core::{Customer, VoucherFactories, VoucherType};
use voucher_db::{Database, DbConfig};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Alan", "Linus", "Barbara", "Dennis", "Margaret", "Ken",
];

const LAST_NAMES: &[&str] = &[
    "Lovelace", "Hopper", "Turing", "Torvalds", "Liskov", "Ritchie", "Hamilton", "Thompson",
];

/// Percent discount steps handed out by the generator.
const PERCENT_STEPS: &[i64] = &[5, 10, 15, 20, 25, 30, 40, 50];

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Voucher Desk seed data generator")]
struct Args {
    /// Database file path
    #[arg(short, long, default_value = "./voucher_dev.db")]
    db: String,

    /// Number of customers to generate
    #[arg(short, long, default_value_t = 20)]
    customers: usize,

    /// Number of vouchers to generate
    #[arg(short, long, default_value_t = 40)]
    vouchers: usize,

    /// Delete existing customers and vouchers first
    #[arg(long)]
    reset: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("🌱 Voucher Desk Seed Data Generator");
    println!("===================================");
    println!("Database:  {}", args.db);
    println!("Customers: {}", args.customers);
    println!("Vouchers:  {}", args.vouchers);
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if args.reset {
        let customers = db.customers().delete_all().await?;
        let vouchers = db.vouchers().delete_all().await?;
        println!("✓ Removed {} customers and {} vouchers", customers, vouchers);
    }

    let existing = db.customers().count().await? + db.vouchers().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} rows", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Re-run with --reset to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();

    println!();
    println!("Generating customers...");
    let customers = db.customers();
    let mut generated_customers = 0;
    for index in 0..args.customers {
        let customer = Customer::new(&customer_name(index))?;
        if let Err(e) = customers.save(&customer).await {
            eprintln!("Failed to insert {}: {}", customer.name(), e);
            continue;
        }
        generated_customers += 1;
    }

    println!("Generating vouchers...");
    let factories = VoucherFactories::with_defaults();
    let vouchers = db.vouchers();
    let mut generated_vouchers = 0;
    for index in 0..args.vouchers {
        let (voucher_type, amount) = voucher_plan(index);
        let voucher = factories.create(voucher_type, amount)?;
        if let Err(e) = vouchers.save(&voucher).await {
            eprintln!("Failed to insert {}: {}", voucher.id(), e);
            continue;
        }
        generated_vouchers += 1;

        if generated_vouchers % 100 == 0 {
            println!("  Generated {} vouchers...", generated_vouchers);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!(
        "✓ Generated {} customers and {} vouchers in {:?}",
        generated_customers, generated_vouchers, elapsed
    );

    let percent = db.vouchers().find_by_type(VoucherType::PercentDiscount).await?;
    println!("  Percent discount vouchers: {}", percent.len());

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds a unique customer name for the given index.
fn customer_name(index: usize) -> String {
    let pairs = FIRST_NAMES.len() * LAST_NAMES.len();
    let first = FIRST_NAMES[index % FIRST_NAMES.len()];
    let last = LAST_NAMES[(index / FIRST_NAMES.len()) % LAST_NAMES.len()];

    match index / pairs {
        0 => format!("{} {}", first, last),
        round => format!("{} {} {}", first, last, round + 1),
    }
}

/// Picks the voucher type and amount for the given index.
fn voucher_plan(index: usize) -> (VoucherType, i64) {
    if index % 2 == 0 {
        let amount = 100 + ((index * 37) % 50) as i64 * 100;
        (VoucherType::FixedAmount, amount)
    } else {
        (
            VoucherType::PercentDiscount,
            PERCENT_STEPS[(index / 2) % PERCENT_STEPS.len()],
        )
    }
}
