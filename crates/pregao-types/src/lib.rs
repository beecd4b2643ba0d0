//! Core types for the pregao B3 price analysis toolkit.
//!
//! This crate provides the fundamental data structures used throughout pregao:
//!
//! - [`PriceBar`] - One trading day of OHLCV data
//! - [`PriceSeries`] - Chronologically ordered bars for one symbol
//! - [`Symbol`] - Normalized exchange ticker
//! - [`Listing`] - Ticker directory entry
//! - [`DateRange`] - Date range for data retrieval

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod date_range;
mod error;
mod listing;
mod symbol;

pub use bar::{PriceBar, PriceSeries};
pub use date_range::DateRange;
pub use error::{DataShapeError, DateRangeError, PrecondWindowError, PregaoError, Result};
pub use listing::Listing;
pub use symbol::{EXCHANGE_SUFFIX, Symbol, SymbolError};
