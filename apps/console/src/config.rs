//! # Configuration
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags (`--db`, `--in-memory`, `--format`)
//! 2. Environment variables (`VOUCHER_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after startup.

use clap::{Parser, ValueEnum};
use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;
use voucher_db::DbConfig;

/// Name of the database file inside the platform data directory.
const DATABASE_FILE: &str = "voucher.db";

/// Command line flags.
#[derive(Debug, Default, Parser)]
#[command(name = "voucher-console", version, about = "Manage discount vouchers and customers")]
pub struct Cli {
    /// SQLite database file (overrides VOUCHER_DB_PATH)
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Use a throwaway in-memory database
    #[arg(long, conflicts_with = "db")]
    pub in_memory: bool,

    /// Listing output format (overrides VOUCHER_OUTPUT_FORMAT)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// How listings are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line per entity
    #[default]
    Text,

    /// One JSON object per line
    Json,
}

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// `voucher.db` in the platform data directory
    Default,

    /// An explicit file path
    File(PathBuf),

    /// In-memory, gone on exit
    InMemory,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Database location
    pub database: DatabaseTarget,

    /// Pool size for file databases
    pub max_connections: u32,

    /// Listing format
    pub output_format: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database: DatabaseTarget::Default,
            max_connections: 5,
            output_format: OutputFormat::Text,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// ## Environment Variables
    /// - `VOUCHER_DB_PATH`: database file
    /// - `VOUCHER_DB_MAX_CONNECTIONS`: pool size (default 5)
    /// - `VOUCHER_OUTPUT_FORMAT`: `text` or `json` (default `text`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through a variable lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(path) = lookup("VOUCHER_DB_PATH").filter(|p| !p.trim().is_empty()) {
            config.database = DatabaseTarget::File(PathBuf::from(path));
        }

        if let Some(max) = lookup("VOUCHER_DB_MAX_CONNECTIONS") {
            config.max_connections = max
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue("VOUCHER_DB_MAX_CONNECTIONS".to_string()))?;
        }

        if let Some(format) = lookup("VOUCHER_OUTPUT_FORMAT") {
            config.output_format = OutputFormat::from_str(format.trim(), true)
                .map_err(|_| ConfigError::InvalidValue("VOUCHER_OUTPUT_FORMAT".to_string()))?;
        }

        Ok(config)
    }

    /// Applies command line flags on top of the loaded values.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if cli.in_memory {
            self.database = DatabaseTarget::InMemory;
        } else if let Some(path) = &cli.db {
            self.database = DatabaseTarget::File(path.clone());
        }

        if let Some(format) = cli.format {
            self.output_format = format;
        }

        self
    }

    /// Builds the pool configuration, creating the data directory if needed.
    pub fn db_config(&self) -> Result<DbConfig, ConfigError> {
        let config = match &self.database {
            DatabaseTarget::InMemory => return Ok(DbConfig::in_memory()),
            DatabaseTarget::File(path) => DbConfig::new(path),
            DatabaseTarget::Default => DbConfig::new(default_database_path()?),
        };
        Ok(config.max_connections(self.max_connections))
    }
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.voucherdesk.voucher/voucher.db`
/// - **Windows**: `%APPDATA%\voucherdesk\voucher\data\voucher.db`
/// - **Linux**: `~/.local/share/voucher/voucher.db`
pub fn default_database_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("com", "voucherdesk", "voucher").ok_or(ConfigError::NoDataDir)?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join(DATABASE_FILE))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine app data directory")]
    NoDataDir,

    #[error("Could not create data directory: {0}")]
    Io(#[from] std::io::Error),
}
