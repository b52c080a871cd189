//! # Console Loop
//!
//! Line-oriented command dispatcher.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Console Session                                      │
//! │                                                                         │
//! │  print menu                                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────────┐  EOF or "exit"                                │
//! │  │  awaiting command    │ ─────────────────► session ends               │
//! │  └──────────┬───────────┘                                               │
//! │             │ line parsed into MenuCommand                              │
//! │             ▼                                                           │
//! │  ┌──────────────────────┐                                               │
//! │  │  processing          │  prompts for arguments, calls the handler,    │
//! │  │                      │  prints the result or "[CODE] message"        │
//! │  └──────────┬───────────┘                                               │
//! │             │                                                           │
//! │             └──────────────► back to awaiting command                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reader and writer are generic so tests can script a whole session with
//! an in-memory byte slice and a `Vec<u8>`.

use serde::Serialize;
use std::fmt::Display;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};
use voucher_core::VoucherFactories;
use voucher_db::Database;

use crate::commands;
use crate::config::OutputFormat;
use crate::error::{ConsoleError, ConsoleResult, ErrorCode};
use crate::menu::MenuCommand;

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive console bound to one database.
pub struct Console<R, W> {
    reader: R,
    writer: W,
    db: Database,
    factories: VoucherFactories,
    format: OutputFormat,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a console with the default voucher factories.
    pub fn new(reader: R, writer: W, db: Database, format: OutputFormat) -> Self {
        Console {
            reader,
            writer,
            db,
            factories: VoucherFactories::with_defaults(),
            format,
        }
    }

    /// Runs the session until `exit` or end of input.
    ///
    /// Command failures are printed and the loop continues. Only a failure
    /// to write output ends the session with an error.
    pub async fn run(&mut self) -> ConsoleResult<()> {
        info!("Console session started");
        self.print(&MenuCommand::menu()).await?;

        loop {
            self.write("> ").await?;

            let Some(line) = self.read_line().await? else {
                debug!("End of input");
                break;
            };
            if line.is_empty() {
                continue;
            }

            match self.dispatch(&line).await {
                Ok(Flow::Exit) => break,
                Ok(Flow::Continue) => {}
                Err(err) if err.code == ErrorCode::IoError => return Err(err),
                Err(err) => self.print_error(&err).await?,
            }
        }

        self.print("Bye.").await?;
        info!("Console session ended");
        Ok(())
    }

    async fn dispatch(&mut self, line: &str) -> ConsoleResult<Flow> {
        let command: MenuCommand = line.parse()?;
        debug!(%command, "Dispatching command");

        match command {
            MenuCommand::CreateVoucher => commands::voucher::create(self).await?,
            MenuCommand::ListVouchers => commands::voucher::list(self).await?,
            MenuCommand::UpdateVoucher => commands::voucher::update(self).await?,
            MenuCommand::DeleteVoucher => commands::voucher::delete(self).await?,
            MenuCommand::ApplyDiscount => commands::voucher::discount(self).await?,
            MenuCommand::CreateCustomer => commands::customer::create(self).await?,
            MenuCommand::ListCustomers => commands::customer::list(self).await?,
            MenuCommand::FindCustomer => commands::customer::find(self).await?,
            MenuCommand::RenameCustomer => commands::customer::rename(self).await?,
            MenuCommand::DeleteCustomer => commands::customer::delete(self).await?,
            MenuCommand::Help => self.print(&MenuCommand::menu()).await?,
            MenuCommand::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Reads one trimmed line, `None` at end of input.
    async fn read_line(&mut self) -> ConsoleResult<Option<String>> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).await?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prints `label` and reads the answer.
    ///
    /// End of input yields an empty answer, which the handlers reject as
    /// missing; the main loop then sees the end of input and exits.
    pub(crate) async fn prompt(&mut self, label: &str) -> ConsoleResult<String> {
        self.write(&format!("{}: ", label)).await?;
        Ok(self.read_line().await?.unwrap_or_default())
    }

    // =========================================================================
    // Output
    // =========================================================================

    async fn write(&mut self, text: &str) -> ConsoleResult<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Prints a line of text.
    pub(crate) async fn print(&mut self, text: &str) -> ConsoleResult<()> {
        let text = text.trim_end_matches('\n');
        self.write(&format!("{}\n", text)).await
    }

    /// Prints one entity in the configured format.
    pub(crate) async fn print_entity<T>(&mut self, label: &str, entity: &T) -> ConsoleResult<()>
    where
        T: Serialize + Display,
    {
        match self.format {
            OutputFormat::Text => self.print(&format!("{}: {}", label, entity)).await,
            OutputFormat::Json => self.print(&serde_json::to_string(entity)?).await,
        }
    }

    /// Prints a listing, one entity per line.
    pub(crate) async fn print_listing<T>(&mut self, items: &[T], empty: &str) -> ConsoleResult<()>
    where
        T: Serialize + Display,
    {
        if items.is_empty() {
            return match self.format {
                OutputFormat::Text => self.print(empty).await,
                OutputFormat::Json => Ok(()),
            };
        }

        for item in items {
            let line = match self.format {
                OutputFormat::Text => item.to_string(),
                OutputFormat::Json => serde_json::to_string(item)?,
            };
            self.print(&line).await?;
        }
        Ok(())
    }

    async fn print_error(&mut self, err: &ConsoleError) -> ConsoleResult<()> {
        let line = match self.format {
            OutputFormat::Text => err.to_string(),
            OutputFormat::Json => serde_json::to_string(err)?,
        };
        self.print(&line).await
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub(crate) fn db(&self) -> &Database {
        &self.db
    }

    pub(crate) fn factories(&self) -> &VoucherFactories {
        &self.factories
    }

    /// Consumes the console, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
