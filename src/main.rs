mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sheetcal_core::config::GlobalConfig;
use sheetcal_core::FailurePolicy;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetcal")]
#[command(about = "Create Google Calendar events from the rows of a spreadsheet")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create one calendar event per row
    Import {
        /// Spreadsheet workbook (.xlsx, .xls, .ods) or CSV file
        file: PathBuf,

        /// Sheet to read from a workbook (defaults to the first)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Google account to use (defaults to the only stored session)
        #[arg(short, long)]
        account: Option<String>,

        /// Keep submitting after a row fails
        #[arg(long)]
        keep_going: bool,
    },
    /// Resolve every row and print the requests without creating anything
    Check {
        /// Spreadsheet workbook (.xlsx, .xls, .ods) or CSV file
        file: PathBuf,

        /// Sheet to read from a workbook (defaults to the first)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Google account to use (defaults to the only stored session)
        #[arg(short, long)]
        account: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = GlobalConfig::load()?;

    match cli.command {
        Commands::Import {
            file,
            sheet,
            account,
            keep_going,
        } => {
            let policy = if keep_going {
                FailurePolicy::KeepGoing
            } else {
                config.failure_policy()
            };
            let account = account.or(config.google_account);
            commands::import::run(&file, sheet.as_deref(), account.as_deref(), policy).await
        }
        Commands::Check {
            file,
            sheet,
            account,
        } => {
            let account = account.or(config.google_account);
            commands::check::run(&file, sheet.as_deref(), account.as_deref()).await
        }
    }
}

/// Log to stderr so the report on stdout stays clean. `RUST_LOG` overrides.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
