//! Logscope CLI
//!
//! Command-line interface for querying a Logscope server.
//!
//! # Usage
//!
//! ```bash
//! logscope --help
//! logscope health
//! logscope logs
//! logscope tail syslog -n 20
//! logscope search "disk full"
//! ```

#![deny(unsafe_code)]

use std::num::NonZeroUsize;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;
use shared::remote::{RemoteAction, RemoteClient, RemoteError, DEFAULT_REMOTE_TIMEOUT};

/// Logscope CLI - read and search logs on a Logscope server
#[derive(Parser)]
#[command(name = "logscope")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API server URL
    #[arg(
        short,
        long,
        env = "LOGSCOPE_API_URL",
        default_value = "http://localhost:8080"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API server health
    Health,
    /// Print every log in the server's log directory, newest line first
    Logs,
    /// Print one log, newest line first
    Log {
        /// File name relative to the server's log directory
        file: String,
    },
    /// Print the most recent lines of one log
    Tail {
        /// File name relative to the server's log directory
        file: String,
        /// Number of lines to print
        #[arg(short = 'n', long, default_value = "10")]
        entries: NonZeroUsize,
    },
    /// Print the lines containing a keyword, per file
    Search {
        /// Case-sensitive text to look for
        keyword: String,
    },
}

impl Commands {
    /// The remote action this command performs, if it maps to one.
    fn action(&self) -> Option<RemoteAction> {
        match self {
            Self::Health => None,
            Self::Logs => Some(RemoteAction::Logs),
            Self::Log { file } => Some(RemoteAction::Log {
                file_name: file.clone(),
            }),
            Self::Tail { file, entries } => Some(RemoteAction::Entries {
                file_name: file.clone(),
                entries: *entries,
            }),
            Self::Search { keyword } => Some(RemoteAction::Search {
                keyword: keyword.clone(),
            }),
        }
    }
}

async fn run(api_url: &str, command: &Commands) -> Result<Value, RemoteError> {
    let client = RemoteClient::new(DEFAULT_REMOTE_TIMEOUT)?;

    match command.action() {
        Some(action) => client.fetch(api_url, &action).await,
        None => client.health(api_url).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Logscope CLI v{}", env!("CARGO_PKG_VERSION"));
        println!("Use --help for usage information");
        return Ok(ExitCode::SUCCESS);
    };

    match run(&cli.api_url, &command).await {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Request failed");
            eprintln!("Error: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
