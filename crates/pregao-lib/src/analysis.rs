//! End-to-end analysis of one listing.

use pregao_indicators::{
    Commentary, CommentaryThresholds, IndicatorEngine, IndicatorSeries, Summary,
};
use pregao_normalize::{ColumnResolution, RawTable, normalize};
use pregao_types::{DateRange, Listing, Result};
use tracing::info;

#[cfg(feature = "fetch")]
use pregao_fetch::SeriesSource;
#[cfg(feature = "fetch")]
use pregao_tickers::TickerDirectory;
#[cfg(feature = "fetch")]
use pregao_types::{PregaoError, Symbol};

/// Indicators and summary for one listing over one date range.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Directory entry of the analysed symbol.
    pub listing: Listing,
    /// Requested range.
    pub range: DateRange,
    /// How the raw column labels were resolved.
    pub resolution: ColumnResolution,
    /// Raw rows dropped for lack of a close.
    pub dropped_rows: usize,
    /// Price table with indicator columns.
    pub indicators: IndicatorSeries,
    /// Latest-row scalars.
    pub summary: Summary,
}

impl Analysis {
    /// Normalizes a raw table and computes indicators over it.
    ///
    /// # Errors
    ///
    /// Returns [`pregao_types::PregaoError::DataShape`] if the table
    /// structure cannot be resolved.
    pub fn from_raw(
        listing: Listing,
        range: DateRange,
        raw: &RawTable,
        engine: &IndicatorEngine,
    ) -> Result<Self> {
        let normalized = normalize(raw)?;
        let indicators = engine.apply(normalized.series);
        let summary = indicators.summary();

        info!(
            symbol = %listing.symbol(),
            rows = indicators.len(),
            resolution = %normalized.resolution,
            dropped = normalized.dropped_rows,
            "analysis complete"
        );

        Ok(Self {
            listing,
            range,
            resolution: normalized.resolution,
            dropped_rows: normalized.dropped_rows,
            indicators,
            summary,
        })
    }

    /// Returns true when no bar survived normalization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// Classifies the summary against `thresholds`.
    #[must_use]
    pub fn commentary(&self, thresholds: &CommentaryThresholds) -> Commentary {
        Commentary::from_summary(&self.summary, thresholds)
    }
}

/// Fetches, normalizes and analyses `input` over `range`.
///
/// The input is normalized to an exchange symbol and must be listed in
/// `directory`. A normalized series with no bars still yields an
/// [`Analysis`]; check [`Analysis::is_empty`].
///
/// # Errors
///
/// - [`PregaoError::InvalidSymbol`] for blank or malformed input
/// - [`PregaoError::UnknownSymbol`] if the symbol is not in the directory
/// - [`PregaoError::NoDataAvailable`] if the source has nothing for the request
/// - [`PregaoError::Http`] if the fetch fails
/// - [`PregaoError::DataShape`] if the raw table cannot be resolved
#[cfg(feature = "fetch")]
pub async fn analyze<S>(
    source: &S,
    directory: &TickerDirectory,
    input: &str,
    range: DateRange,
    engine: &IndicatorEngine,
) -> Result<Analysis>
where
    S: SeriesSource + ?Sized,
{
    let symbol = Symbol::parse(input)?;
    let listing = directory
        .get(symbol.as_str())
        .cloned()
        .ok_or_else(|| PregaoError::UnknownSymbol(symbol.to_string()))?;

    info!(%symbol, %range, "fetching price history");
    let Some(raw) = source.fetch_raw(&symbol, range).await? else {
        return Err(PregaoError::NoDataAvailable {
            symbol: symbol.to_string(),
        });
    };

    Analysis::from_raw(listing, range, &raw, engine)
}

#[cfg(all(test, feature = "fetch"))]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Days, NaiveDate};
    use pregao_fetch::FetchError;
    use pregao_indicators::{IndicatorKind, TrendBand};
    use pregao_normalize::RawCell;
    use pregao_types::DataShapeError;

    /// Serves a fixed table for every request.
    #[derive(Debug)]
    struct FixedSource(Option<RawTable>);

    #[async_trait]
    impl SeriesSource for FixedSource {
        async fn fetch_raw(
            &self,
            _symbol: &Symbol,
            _range: DateRange,
        ) -> std::result::Result<Option<RawTable>, FetchError> {
            Ok(self.0.clone())
        }
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn range() -> DateRange {
        DateRange::trailing(start() + Days::new(40), 730)
    }

    fn ramp_table(n: u32) -> RawTable {
        let index = (0..n).map(|i| start() + Days::new(u64::from(i))).collect();
        let closes = (0..n).map(|i| RawCell::from(100.0 + f64::from(i))).collect();
        RawTable::new(index).with_column("Close", closes)
    }

    async fn run(source: &FixedSource, input: &str) -> Result<Analysis> {
        analyze(
            source,
            TickerDirectory::global(),
            input,
            range(),
            &IndicatorEngine::with_defaults(),
        )
        .await
    }

    #[tokio::test]
    async fn test_analyze_ramp() {
        let analysis = run(&FixedSource(Some(ramp_table(25))), "petr4").await.unwrap();

        assert_eq!(analysis.listing.symbol().as_str(), "PETR4.SA");
        assert_eq!(analysis.indicators.len(), 25);
        assert_eq!(analysis.summary.latest_close, Some(124.0));
        assert_eq!(analysis.indicators.latest(IndicatorKind::Sma(20)), Some(114.5));

        // 124 vs 114.5 is about +8.3%
        let commentary = analysis.commentary(&CommentaryThresholds::default());
        assert_eq!(commentary.trend, Some(TrendBand::Above));
        assert_eq!(commentary.rsi_zone, None);
    }

    #[tokio::test]
    async fn test_unknown_symbol() {
        let err = run(&FixedSource(None), "ZZZZ9").await.unwrap_err();
        assert!(matches!(err, PregaoError::UnknownSymbol(s) if s == "ZZZZ9.SA"));
    }

    #[tokio::test]
    async fn test_blank_input() {
        let err = run(&FixedSource(None), "   ").await.unwrap_err();
        assert!(matches!(err, PregaoError::InvalidSymbol(_)));
    }

    #[tokio::test]
    async fn test_no_data() {
        let err = run(&FixedSource(None), "VALE3").await.unwrap_err();
        assert!(matches!(err, PregaoError::NoDataAvailable { symbol } if symbol == "VALE3.SA"));
    }

    #[tokio::test]
    async fn test_empty_table_yields_empty_analysis() {
        let analysis = run(&FixedSource(Some(RawTable::default())), "ITUB4")
            .await
            .unwrap();

        assert!(analysis.is_empty());
        assert!(analysis.summary.is_empty());
        assert_eq!(analysis.indicators.columns().len(), 5);
        assert!(analysis.indicators.columns().iter().all(|c| c.values.is_empty()));
    }

    #[tokio::test]
    async fn test_shape_error_aborts() {
        let table = RawTable::new(vec![start()])
            .with_column("Close", vec![RawCell::from(1.0)])
            .with_column(("Open", "PETR4.SA"), vec![RawCell::from(1.0)]);
        let err = run(&FixedSource(Some(table)), "PETR4").await.unwrap_err();
        assert!(matches!(
            err,
            PregaoError::DataShape(DataShapeError::MixedLevels)
        ));
    }

    #[tokio::test]
    async fn test_unresolved_close_yields_empty_analysis() {
        let table = RawTable::new(vec![start()])
            .with_column(("Price", "X"), vec![RawCell::from(1.0)]);
        let analysis = run(&FixedSource(Some(table)), "PETR4").await.unwrap();

        assert!(analysis.is_empty());
        assert_eq!(analysis.dropped_rows, 1);
        assert_eq!(analysis.resolution, ColumnResolution::Joined);
    }
}
