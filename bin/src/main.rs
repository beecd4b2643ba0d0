//! pregao CLI - B3 price history with moving averages and RSI.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use commands::analyze::AnalyzeArgs;
use display::{Format, SeedArg};

#[derive(Parser)]
#[command(name = "pregao")]
#[command(about = "B3 price history with moving averages, RSI and commentary", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the B3 ticker directory
    Search {
        /// Substring of the ticker or company name. Lists everything when omitted.
        query: Option<String>,

        /// Maximum number of results
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Show a ticker's directory entry
    Info {
        /// Ticker, with or without the .SA suffix (e.g., petr4)
        symbol: String,
    },

    /// Fetch prices and compute indicators for a ticker
    Analyze {
        /// Ticker, with or without the .SA suffix. Prompts when omitted.
        symbol: Option<String>,

        /// Start date (YYYY-MM-DD). Defaults to two years before the end date.
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(short, long)]
        end: Option<String>,

        /// JSON file with indicator windows
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the indicator table to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format. Guessed from the output extension when omitted.
        #[arg(short, long, value_enum)]
        format: Option<Format>,

        /// How the EMA recursion is seeded
        #[arg(long, value_enum)]
        ema_seed: Option<SeedArg>,
    },
}

/// Routes `tracing` output to stderr; `RUST_LOG` overrides the `-v` level.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Search { query, limit } => commands::search::search(query.as_deref(), limit),
        Commands::Info { symbol } => commands::info::show_info(&symbol),
        Commands::Analyze {
            symbol,
            start,
            end,
            config,
            output,
            format,
            ema_seed,
        } => {
            let args = AnalyzeArgs {
                symbol,
                start,
                end,
                config,
                output,
                format,
                ema_seed,
            };
            commands::analyze::analyze(args, cli.quiet).await
        }
    }
}
