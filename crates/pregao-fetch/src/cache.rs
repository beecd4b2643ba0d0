//! Time-to-live cache in front of a [`SeriesSource`].

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use pregao_normalize::RawTable;
use pregao_types::{DateRange, Symbol};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::trace;

use crate::{FetchError, SeriesSource};

/// Default entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug)]
struct Entry {
    fetched_at: Instant,
    table: Option<RawTable>,
}

impl Entry {
    fn is_live(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Memoizes a source per `(symbol, range)` for a fixed time-to-live.
///
/// Empty results are cached too; errors are not.
#[derive(Debug)]
pub struct CachedSource<S> {
    inner: S,
    ttl: Duration,
    entries: RwLock<HashMap<(Symbol, DateRange), Entry>>,
}

impl<S> CachedSource<S> {
    /// Wraps `inner` with the default one hour lifetime.
    pub fn new(inner: S) -> Self {
        Self::with_ttl(inner, DEFAULT_TTL)
    }

    /// Wraps `inner` with a custom lifetime.
    pub fn with_ttl(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the entry lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the wrapped source.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Drops every cached entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Returns the number of live entries.
    pub async fn len(&self) -> usize {
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.is_live(self.ttl))
            .count()
    }

    /// Returns true if no live entry is cached.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl<S: SeriesSource> SeriesSource for CachedSource<S> {
    async fn fetch_raw(
        &self,
        symbol: &Symbol,
        range: DateRange,
    ) -> Result<Option<RawTable>, FetchError> {
        let key = (symbol.clone(), range);

        if let Some(entry) = self.entries.read().await.get(&key) {
            if entry.is_live(self.ttl) {
                trace!(%symbol, %range, "cache hit");
                return Ok(entry.table.clone());
            }
        }

        trace!(%symbol, %range, "cache miss");
        let table = self.inner.fetch_raw(symbol, range).await?;

        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(self.ttl));
        if entries.len() < before {
            trace!(evicted = before - entries.len(), "dropped expired entries");
        }
        entries.insert(
            key,
            Entry {
                fetched_at: Instant::now(),
                table: table.clone(),
            },
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pregao_normalize::RawCell;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SeriesSource for CountingSource {
        async fn fetch_raw(
            &self,
            symbol: &Symbol,
            range: DateRange,
        ) -> Result<Option<RawTable>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if symbol.base() == "NONE" {
                return Ok(None);
            }
            Ok(Some(
                RawTable::new(vec![range.start]).with_column("Close", vec![RawCell::from(1.0)]),
            ))
        }
    }

    fn range() -> DateRange {
        DateRange::single_day(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    fn symbol(s: &str) -> Symbol {
        Symbol::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_hit_within_ttl() {
        let cache = CachedSource::new(CountingSource::default());

        let first = cache.fetch_raw(&symbol("PETR4"), range()).await.unwrap();
        let second = cache.fetch_raw(&symbol("petr4.sa"), range()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_always_refetches() {
        let cache = CachedSource::with_ttl(CountingSource::default(), Duration::ZERO);

        cache.fetch_raw(&symbol("PETR4"), range()).await.unwrap();
        cache.fetch_raw(&symbol("PETR4"), range()).await.unwrap();

        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires() {
        let cache = CachedSource::new(CountingSource::default());

        cache.fetch_raw(&symbol("VALE3"), range()).await.unwrap();
        tokio::time::advance(Duration::from_secs(3599)).await;
        cache.fetch_raw(&symbol("VALE3"), range()).await.unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        cache.fetch_raw(&symbol("VALE3"), range()).await.unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entries_are_evicted_on_insert() {
        let cache = CachedSource::new(CountingSource::default());

        cache.fetch_raw(&symbol("PETR4"), range()).await.unwrap();
        cache.fetch_raw(&symbol("VALE3"), range()).await.unwrap();
        tokio::time::advance(Duration::from_secs(3601)).await;
        assert_eq!(cache.len().await, 0);
        assert!(cache.is_empty().await);

        cache.fetch_raw(&symbol("ITUB4"), range()).await.unwrap();
        assert_eq!(cache.entries.read().await.len(), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_empty_results_are_cached_per_key() {
        let cache = CachedSource::new(CountingSource::default());

        assert!(cache.fetch_raw(&symbol("NONE"), range()).await.unwrap().is_none());
        assert!(cache.fetch_raw(&symbol("NONE"), range()).await.unwrap().is_none());
        cache.fetch_raw(&symbol("ITUB4"), range()).await.unwrap();

        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len().await, 2);

        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
