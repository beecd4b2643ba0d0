//! Technical indicators for pregao.
//!
//! This crate derives indicator columns from a canonical
//! [`PriceSeries`](pregao_types::PriceSeries):
//!
//! - [`IndicatorEngine`] - Appends SMA, EMA and RSI columns per [`IndicatorConfig`]
//! - [`Summary`] - Latest close, deviations from each average, latest RSI
//! - [`Commentary`] - Threshold bands over the summary
//!
//! The single-column functions ([`simple_moving_average`],
//! [`exponential_moving_average`], [`relative_strength_index`]) are exposed
//! for callers that work on plain close slices.

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod commentary;
mod config;
mod engine;
mod moving_average;
mod rsi;
mod series;
mod summary;

pub use commentary::{Commentary, CommentaryThresholds, RsiZone, TrendBand};
pub use config::{IndicatorConfig, IndicatorKind};
pub use engine::IndicatorEngine;
pub use moving_average::{EmaSeed, exponential_moving_average, simple_moving_average};
pub use rsi::relative_strength_index;
pub use series::{IndicatorColumn, IndicatorSeries};
pub use summary::{Deviation, Summary, percent_deviation};
