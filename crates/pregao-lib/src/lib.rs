//! B3 equity price history, normalized and annotated with technical indicators.
//!
//! This is a facade crate that re-exports functionality from the pregao
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use pregao_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = CachedSource::new(YahooClient::with_defaults()?);
//!     let range = DateRange::trailing(chrono::Local::now().date_naive(), 730);
//!
//!     let analysis = analyze(
//!         &source,
//!         TickerDirectory::global(),
//!         "petr4",
//!         range,
//!         &IndicatorEngine::with_defaults(),
//!     )
//!     .await?;
//!
//!     for line in analysis.commentary(&CommentaryThresholds::default()).lines() {
//!         println!("{line}");
//!     }
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod analysis;

pub use analysis::Analysis;
#[cfg(feature = "fetch")]
pub use analysis::analyze;

// Re-export core types
pub use pregao_types::*;

// Re-export the ticker directory
pub use pregao_tickers::TickerDirectory;

// Re-export normalization
pub use pregao_normalize::{
    ColumnLabel, ColumnResolution, Field, Normalized, RawCell, RawColumn, RawTable, normalize,
};

// Re-export indicators
pub use pregao_indicators::{
    Commentary, CommentaryThresholds, Deviation, EmaSeed, IndicatorColumn, IndicatorConfig,
    IndicatorEngine, IndicatorKind, IndicatorSeries, RsiZone, Summary, TrendBand,
    exponential_moving_average, percent_deviation, relative_strength_index,
    simple_moving_average,
};

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use pregao_fetch::{CachedSource, ClientConfig, FetchError, SeriesSource, YahooClient};

// Re-export formatters
#[cfg(feature = "format")]
pub use pregao_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use pregao_format::ParquetFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use pregao_lib::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Analysis;
    #[cfg(feature = "fetch")]
    pub use crate::analyze;

    pub use pregao_types::{
        DateRange, DateRangeError, Listing, PriceBar, PriceSeries, PregaoError, Result, Symbol,
    };

    pub use pregao_tickers::TickerDirectory;

    pub use pregao_normalize::{RawTable, normalize};

    pub use pregao_indicators::{
        Commentary, CommentaryThresholds, EmaSeed, IndicatorConfig, IndicatorEngine,
        IndicatorKind, IndicatorSeries, Summary,
    };

    #[cfg(feature = "fetch")]
    pub use pregao_fetch::{CachedSource, ClientConfig, SeriesSource, YahooClient};

    #[cfg(feature = "format")]
    pub use pregao_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use pregao_format::ParquetFormatter;
}
