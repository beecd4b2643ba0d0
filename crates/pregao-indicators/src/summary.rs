//! Latest-row summary scalars.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{IndicatorKind, IndicatorSeries};

/// Percentage deviation of the latest close from a moving average.
///
/// Returns `(close / ma - 1) * 100`, or `None` when the average is undefined
/// or zero.
///
/// ```
/// use pregao_indicators::percent_deviation;
///
/// assert_eq!(percent_deviation(90.0, None), None);
/// assert_eq!(percent_deviation(90.0, Some(0.0)), None);
/// ```
#[must_use]
pub fn percent_deviation(latest_close: f64, latest_ma: Option<f64>) -> Option<f64> {
    match latest_ma {
        Some(ma) if ma != 0.0 => Some((latest_close / ma - 1.0) * 100.0),
        _ => None,
    }
}

/// Deviation of the latest close from one moving-average column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Deviation {
    /// Average the close is compared to.
    pub kind: IndicatorKind,
    /// Latest value of the average.
    pub latest: Option<f64>,
    /// Percent deviation of the close from `latest`.
    pub percent: Option<f64>,
}

/// Scalars describing the latest row of an [`IndicatorSeries`].
///
/// For an empty series every scalar is `None` and each moving-average
/// column still has a [`Deviation`] entry with undefined values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Date of the latest bar.
    pub latest_date: Option<NaiveDate>,
    /// Latest close.
    pub latest_close: Option<f64>,
    /// One entry per moving-average column, in engine order.
    pub deviations: Vec<Deviation>,
    /// Latest RSI value.
    pub latest_rsi: Option<f64>,
}

impl Summary {
    pub(crate) fn from_series(series: &IndicatorSeries) -> Self {
        let last = series.prices().last();

        let deviations = series
            .columns()
            .iter()
            .filter(|c| c.kind.is_moving_average())
            .map(|c| {
                let latest = c.latest();
                Deviation {
                    kind: c.kind,
                    latest,
                    percent: last.and_then(|bar| percent_deviation(bar.close, latest)),
                }
            })
            .collect();

        let latest_rsi = series
            .columns()
            .iter()
            .find(|c| matches!(c.kind, IndicatorKind::Rsi(_)))
            .and_then(|c| c.latest());

        Self {
            latest_date: last.map(|bar| bar.date),
            latest_close: last.map(|bar| bar.close),
            deviations,
            latest_rsi,
        }
    }

    /// Returns the deviation entry for a moving-average column.
    #[must_use]
    pub fn deviation(&self, kind: IndicatorKind) -> Option<&Deviation> {
        self.deviations.iter().find(|d| d.kind == kind)
    }

    /// Returns true when there is no latest row.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.latest_close.is_none()
    }
}
