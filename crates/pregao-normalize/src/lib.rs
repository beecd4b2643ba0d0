//! Raw price table normalization for pregao.
//!
//! This crate turns whatever shape a market data provider returns into a
//! canonical [`PriceSeries`](pregao_types::PriceSeries):
//!
//! - [`RawTable`] - Date index plus flat or two-level labelled columns
//! - [`ColumnResolution`] - Which label level supplied the field names
//! - [`normalize`] - Resolution, duplicate collapse, coercion and close filter

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod normalizer;
mod resolve;
mod table;

pub use normalizer::{Normalized, normalize};
pub use resolve::{ColumnResolution, Field};
pub use table::{ColumnLabel, RawCell, RawColumn, RawTable};
