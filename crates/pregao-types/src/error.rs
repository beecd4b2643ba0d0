//! Error types for pregao.

use chrono::NaiveDate;
use thiserror::Error;

use crate::SymbolError;

/// Result type alias for pregao operations.
pub type Result<T> = std::result::Result<T, PregaoError>;

/// Errors that can occur while fetching, normalizing and analysing price data.
#[derive(Error, Debug)]
pub enum PregaoError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The raw table could not be resolved into canonical fields.
    #[error(transparent)]
    DataShape(#[from] DataShapeError),

    /// An indicator was requested with a non-positive window.
    #[error(transparent)]
    PrecondWindow(#[from] PrecondWindowError),

    /// The input could not be turned into an exchange symbol.
    #[error(transparent)]
    InvalidSymbol(#[from] SymbolError),

    /// Symbol is not listed in the ticker directory.
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    /// Invalid date range.
    #[error(transparent)]
    DateRange(#[from] DateRangeError),

    /// No data available for the requested period.
    #[error("No data available for {symbol} in requested range")]
    NoDataAvailable {
        /// The symbol that had no data.
        symbol: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output format error.
    #[error("Format error: {0}")]
    Format(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The column structure of a raw price table cannot be resolved.
///
/// Fatal to the request; callers surface it as "no usable data".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataShapeError {
    /// Flat and two-level column labels appear in the same table.
    #[error("Cannot mix flat and two-level column labels")]
    MixedLevels,

    /// A column does not have one cell per index entry.
    #[error("Column '{column}' has {actual} cells, expected {expected}")]
    RaggedColumn {
        /// Display name of the offending column.
        column: String,
        /// Number of rows in the date index.
        expected: usize,
        /// Number of cells in the column.
        actual: usize,
    },

    /// The date index is not strictly increasing.
    #[error("Date index is not strictly increasing at row {row} ({date})")]
    UnorderedIndex {
        /// Row at which the order breaks.
        row: usize,
        /// Date found at that row.
        date: NaiveDate,
    },
}

/// An indicator was requested with a window of zero.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{indicator} window must be positive, got {window}")]
pub struct PrecondWindowError {
    /// Name of the indicator family (e.g. "SMA").
    pub indicator: &'static str,
    /// The rejected window.
    pub window: usize,
}

impl PrecondWindowError {
    /// Creates a new window error for the given indicator family.
    #[must_use]
    pub const fn new(indicator: &'static str, window: usize) -> Self {
        Self { indicator, window }
    }
}

/// Error for invalid date ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// Start date is after end date.
    #[error("Invalid date range: {start} > {end}")]
    InvalidRange {
        /// The start date.
        start: NaiveDate,
        /// The end date.
        end: NaiveDate,
    },
}
