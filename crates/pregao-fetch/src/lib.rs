//! Price history retrieval for pregao.
//!
//! This crate provides the data acquisition boundary:
//!
//! - [`SeriesSource`] - Async trait yielding raw provider tables
//! - [`YahooClient`] - Chart endpoint client with retries and backoff
//! - [`CachedSource`] - Per `(symbol, range)` memoization with a time-to-live

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cache;
mod chart;
mod client;
mod error;
mod source;

pub use cache::{CachedSource, DEFAULT_TTL};
pub use client::{ClientConfig, DEFAULT_BASE_URL, YahooClient};
pub use error::FetchError;
pub use source::SeriesSource;
