//! Analyze command implementation.
//!
//! Resolves a ticker (prompting when none is given), fetches its daily
//! history, computes the configured indicators and prints a short report.

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{Select, Text};
use pregao_lib::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::display::{self, Format, SeedArg};

/// Default look-back when no start date is given.
const DEFAULT_LOOKBACK_DAYS: u64 = 730;

/// Number of listings offered by the interactive picker.
const PICKER_LIMIT: usize = 30;

/// Arguments of the `analyze` command.
pub(crate) struct AnalyzeArgs {
    pub(crate) symbol: Option<String>,
    pub(crate) start: Option<String>,
    pub(crate) end: Option<String>,
    pub(crate) config: Option<PathBuf>,
    pub(crate) output: Option<PathBuf>,
    pub(crate) format: Option<Format>,
    pub(crate) ema_seed: Option<SeedArg>,
}

/// Fetch, compute and report indicators for one ticker.
pub(crate) async fn analyze(args: AnalyzeArgs, quiet: bool) -> Result<()> {
    let directory = TickerDirectory::global();

    let input = match args.symbol {
        Some(symbol) => symbol,
        None => pick_symbol(directory)?,
    };
    let range = parse_range(args.start.as_deref(), args.end.as_deref())?;
    let engine = build_engine(args.config.as_deref(), args.ema_seed)?;
    let client = YahooClient::with_defaults().context("Failed to build HTTP client")?;

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };
    progress.set_message(format!("Fetching {input} ({range})"));

    let result = pregao_lib::analyze(&client, directory, &input, range, &engine).await;
    progress.finish_and_clear();

    let analysis = match result {
        Ok(analysis) => analysis,
        Err(PregaoError::NoDataAvailable { symbol }) => {
            println!("No data returned for {symbol} between {range}.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if analysis.is_empty() {
        println!(
            "No usable price data for {} between {range}.",
            analysis.listing.symbol()
        );
        return Ok(());
    }

    print_report(&analysis);

    if let Some(output) = args.output {
        let format = Format::resolve(args.format, &output);
        display::write_series(&analysis.indicators, &output, format)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("\nWrote {} rows to {} ({format})", analysis.indicators.len(), output.display());
    }

    Ok(())
}

/// Prompt for a search term, then for one of the matching listings.
fn pick_symbol(directory: &TickerDirectory) -> Result<String> {
    let query = Text::new("Search ticker or company:")
        .with_help_message("leave empty to browse")
        .prompt()
        .context("Symbol search cancelled")?;

    let options = directory.search(&query, PICKER_LIMIT);
    if options.is_empty() {
        bail!("No listings match '{query}'");
    }

    let selection = Select::new("Select a listing:", options)
        .prompt()
        .context("Listing selection cancelled")?;

    Ok(selection.symbol().to_string())
}

/// Build the inclusive date range, defaulting to the trailing two years.
fn parse_range(start: Option<&str>, end: Option<&str>) -> Result<DateRange> {
    let end = match end {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };

    match start {
        Some(s) => Ok(DateRange::new(parse_date(s)?, end)?),
        None => Ok(DateRange::trailing(end, DEFAULT_LOOKBACK_DAYS)),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{s}', expected YYYY-MM-DD"))
}

/// Load the indicator config (if any) and apply the seed override.
fn build_engine(path: Option<&Path>, seed: Option<SeedArg>) -> Result<IndicatorEngine> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str::<IndicatorConfig>(&text)
                .with_context(|| format!("Invalid indicator config in {}", path.display()))?
        }
        None => IndicatorConfig::default(),
    };
    if let Some(seed) = seed {
        config = config.with_ema_seed(seed.into());
    }
    debug!(?config, "indicator config");

    Ok(IndicatorEngine::new(config)?)
}

fn print_report(analysis: &Analysis) {
    let summary = &analysis.summary;

    println!("{}", analysis.listing);
    println!("{}", "-".repeat(60));
    if let Some(date) = summary.latest_date {
        println!("{:<16} {}", "Last session", date);
    }
    if let Some(close) = summary.latest_close {
        println!("{:<16} {}", "Close", display::format_brl(close));
    }

    for deviation in &summary.deviations {
        println!(
            "{:<16} {:>10}  {}",
            deviation.kind.name(),
            display::format_value(deviation.latest),
            display::format_percent(deviation.percent),
        );
    }
    println!("{:<16} {:>10}", "RSI", display::format_value(summary.latest_rsi));

    if analysis.dropped_rows > 0 {
        println!("({} rows without a close were dropped)", analysis.dropped_rows);
    }

    println!();
    for line in analysis.commentary(&CommentaryThresholds::default()).lines() {
        println!("{line}");
    }
}
