//! # Voucher Console Library
//!
//! Core library for the Voucher Desk console application.
//!
//! ## Module Organization
//! ```text
//! voucher_console/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── Flags, env vars, database location
//! ├── console.rs      ◄─── Read/dispatch/print loop
//! ├── menu.rs         ◄─── MenuCommand parsing
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── voucher.rs  ◄─── Voucher commands
//! │   └── customer.rs ◄─── Customer commands
//! └── error.rs        ◄─── ConsoleError for commands
//! ```

pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod menu;

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{AppConfig, Cli};
use console::Console;
use error::ConsoleResult;
use voucher_db::Database;

/// Runs the console application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • VOUCHER_* environment variables, then command line flags          │
/// │                                                                         │
/// │  2. Determine Database Path ──────────────────────────────────────────► │
/// │     • --in-memory, --db / VOUCHER_DB_PATH, or the platform data dir     │
/// │                                                                         │
/// │  3. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode                                              │
/// │     • Run pending migrations                                            │
/// │                                                                         │
/// │  4. Run Console on stdin/stdout ──────────────────────────────────────► │
/// │     • Until `exit` or end of input                                      │
/// │                                                                         │
/// │  5. Close the pool                                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> ConsoleResult<()> {
    info!("Starting Voucher Desk console");

    let config = AppConfig::from_env()?.with_cli(&cli);
    let db_config = config.db_config()?;
    info!(
        path = %db_config.database_path.display(),
        format = ?config.output_format,
        "Configuration loaded"
    );

    let db = Database::new(db_config).await?;
    info!("Database connected and migrations applied");

    let mut console = Console::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        db.clone(),
        config.output_format,
    );
    let result = console.run().await;

    db.close().await;
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never mix with console output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=voucher=trace` - Show trace for voucher crates only
/// - Default: WARN, INFO for voucher crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,voucher=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
