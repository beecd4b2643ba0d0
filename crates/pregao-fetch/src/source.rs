//! The price history source boundary.

use std::sync::Arc;

use async_trait::async_trait;
use pregao_normalize::RawTable;
use pregao_types::{DateRange, Symbol};

use crate::FetchError;

/// Anything that can supply raw daily price history.
///
/// `Ok(None)` means the provider has no data for the request (unknown or
/// delisted symbol, empty range). Errors are reserved for transport and
/// decoding failures.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Fetches the raw table for `symbol` over the inclusive `range`.
    async fn fetch_raw(
        &self,
        symbol: &Symbol,
        range: DateRange,
    ) -> Result<Option<RawTable>, FetchError>;
}

#[async_trait]
impl<S: SeriesSource + ?Sized> SeriesSource for Arc<S> {
    async fn fetch_raw(
        &self,
        symbol: &Symbol,
        range: DateRange,
    ) -> Result<Option<RawTable>, FetchError> {
        (**self).fetch_raw(symbol, range).await
    }
}
