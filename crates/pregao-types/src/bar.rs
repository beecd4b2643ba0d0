//! Daily price bar and price series representation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::DataShapeError;

/// One trading day of price data.
///
/// Only the close is required; the other fields are best-effort and stay
/// `None` when the provider had no usable value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading day.
    pub date: NaiveDate,
    /// Opening price.
    pub open: Option<f64>,
    /// Highest price of the day.
    pub high: Option<f64>,
    /// Lowest price of the day.
    pub low: Option<f64>,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: Option<f64>,
}

impl PriceBar {
    /// Creates a new bar.
    #[must_use]
    pub const fn new(
        date: NaiveDate,
        open: Option<f64>,
        high: Option<f64>,
        low: Option<f64>,
        close: f64,
        volume: Option<f64>,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Creates a bar where only the close is known.
    #[must_use]
    pub const fn close_only(date: NaiveDate, close: f64) -> Self {
        Self::new(date, None, None, None, close, None)
    }
}

/// Chronologically ordered daily bars for one symbol and date range.
///
/// Dates are unique and strictly increasing. The series is immutable once
/// built; a new request produces a new series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Creates a series from bars, validating the date order.
    ///
    /// # Errors
    ///
    /// Returns [`DataShapeError::UnorderedIndex`] if two consecutive bars are
    /// not in strictly increasing date order.
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, DataShapeError> {
        if let Some(row) = bars.windows(2).position(|w| w[1].date <= w[0].date) {
            return Err(DataShapeError::UnorderedIndex {
                row: row + 1,
                date: bars[row + 1].date,
            });
        }
        Ok(Self { bars })
    }

    /// Creates an empty series.
    #[must_use]
    pub const fn empty() -> Self {
        Self { bars: Vec::new() }
    }

    /// Returns the bars.
    #[must_use]
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Returns the number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns true if the series has no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Returns the most recent bar.
    #[must_use]
    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Returns the close column.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Returns the date column.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    /// Returns an iterator over the bars.
    pub fn iter(&self) -> std::slice::Iter<'_, PriceBar> {
        self.bars.iter()
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PriceBar;
    type IntoIter = std::slice::Iter<'a, PriceBar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_series_accepts_increasing_dates() {
        let series = PriceSeries::new(vec![
            PriceBar::close_only(date(2), 10.0),
            PriceBar::close_only(date(3), 11.0),
            PriceBar::close_only(date(5), 12.5),
        ])
        .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![10.0, 11.0, 12.5]);
        assert_eq!(series.last().map(|b| b.date), Some(date(5)));
    }

    #[test]
    fn test_series_rejects_duplicate_dates() {
        let result = PriceSeries::new(vec![
            PriceBar::close_only(date(2), 10.0),
            PriceBar::close_only(date(2), 11.0),
        ]);

        assert_eq!(
            result,
            Err(DataShapeError::UnorderedIndex {
                row: 1,
                date: date(2)
            })
        );
    }
}
