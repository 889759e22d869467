//! Command-line arguments for the message service.
//!
//! Every flag can also be supplied through the environment variable named next
//! to it. See `main` for how they are wired together.
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use quote_common::net::{MESSAGE_PORT, addr};

/// Where quotes are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// The `quotes` list of the settings file.
    Static,
    /// A SQLite database, seeded from the settings file when empty.
    Store,
}

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Address the HTTP server binds to.
    #[arg(long, env = "MESSAGE_SERVICE_BIND", default_value_t = addr("127.0.0.1", MESSAGE_PORT))]
    pub bind: String,

    /// JSON settings file holding `service_version` and `quotes`.
    /// Re-read on `POST /refresh`.
    #[arg(long, env = "MESSAGE_SERVICE_CONFIG")]
    pub config: PathBuf,

    /// Quote source backing the endpoints.
    #[arg(long, env = "MESSAGE_SERVICE_SOURCE", value_enum, default_value_t = SourceKind::Static)]
    pub source: SourceKind,

    /// SQLite URL used with `--source store`.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://quotes.db?mode=rwc")]
    pub database_url: String,
}
