//! Indicator engine.

use pregao_types::{PrecondWindowError, PriceSeries};
use tracing::debug;

use crate::moving_average::{ema_values, sma_values};
use crate::rsi::rsi_values;
use crate::{IndicatorColumn, IndicatorConfig, IndicatorKind, IndicatorSeries};

/// Appends the configured indicator columns to a price series.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use pregao_indicators::{IndicatorEngine, IndicatorKind};
/// use pregao_types::{PriceBar, PriceSeries};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let bars = (0..25)
///     .map(|i| PriceBar::close_only(start + chrono::Days::new(i), 100.0 + i as f64))
///     .collect();
/// let series = PriceSeries::new(bars).unwrap();
///
/// let indicators = IndicatorEngine::with_defaults().apply(series);
/// assert_eq!(indicators.latest(IndicatorKind::Sma(20)), Some(114.5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl IndicatorEngine {
    /// Creates an engine from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PrecondWindowError`] if any window or span is zero.
    pub fn new(config: IndicatorConfig) -> Result<Self, PrecondWindowError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Creates an engine with SMA 20/50/200, EMA 20 and RSI 14.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Computes every configured column over the closes of `prices`.
    ///
    /// Rows are never removed or reordered; an empty series yields every
    /// column with zero entries.
    #[must_use]
    pub fn apply(&self, prices: PriceSeries) -> IndicatorSeries {
        let closes = prices.closes();

        let columns: Vec<IndicatorColumn> = self
            .config
            .kinds()
            .into_iter()
            .map(|kind| {
                let values = match kind {
                    IndicatorKind::Sma(window) => sma_values(&closes, window),
                    IndicatorKind::Ema(span) => ema_values(&closes, span, self.config.ema_seed),
                    IndicatorKind::Rsi(window) => rsi_values(&closes, window),
                };
                IndicatorColumn::new(kind, values)
            })
            .collect();

        debug!(
            rows = closes.len(),
            columns = columns.len(),
            seed = %self.config.ema_seed,
            "computed indicators"
        );
        IndicatorSeries::new(prices, columns)
    }
}
