//! # Voucher Console Entry Point
//!
//! ## Startup Sequence
//! 1. Parse command line flags
//! 2. Initialize tracing (stderr)
//! 3. Hand over to `voucher_console::run`
//!
//! Exits with status 1 when startup fails or output can't be written.

use clap::Parser;
use std::process::ExitCode;
use voucher_console::config::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    voucher_console::init_tracing();

    match voucher_console::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
