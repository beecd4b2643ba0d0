//! Price series with derived indicator columns.

use pregao_types::PriceSeries;
use serde::Serialize;

use crate::{IndicatorKind, Summary};

/// One derived column, aligned with the source bars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorColumn {
    /// What the column holds.
    pub kind: IndicatorKind,
    /// One entry per bar; `None` where undefined.
    pub values: Vec<Option<f64>>,
}

impl IndicatorColumn {
    /// Creates a column.
    #[must_use]
    pub const fn new(kind: IndicatorKind, values: Vec<Option<f64>>) -> Self {
        Self { kind, values }
    }

    /// Returns the last entry, `None` when empty or undefined.
    #[must_use]
    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    /// Returns the number of defined entries.
    #[must_use]
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// A [`PriceSeries`] together with the columns computed from its closes.
///
/// Every column has exactly as many entries as the series has bars.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndicatorSeries {
    prices: PriceSeries,
    columns: Vec<IndicatorColumn>,
}

impl IndicatorSeries {
    pub(crate) const fn new(prices: PriceSeries, columns: Vec<IndicatorColumn>) -> Self {
        Self { prices, columns }
    }

    /// Returns the source prices.
    #[must_use]
    pub const fn prices(&self) -> &PriceSeries {
        &self.prices
    }

    /// Returns the derived columns in engine order.
    #[must_use]
    pub fn columns(&self) -> &[IndicatorColumn] {
        &self.columns
    }

    /// Looks up a column by kind.
    #[must_use]
    pub fn column(&self, kind: IndicatorKind) -> Option<&IndicatorColumn> {
        self.columns.iter().find(|c| c.kind == kind)
    }

    /// Looks up a column by canonical name, e.g. `"RSI14"`.
    #[must_use]
    pub fn column_by_name(&self, name: &str) -> Option<&IndicatorColumn> {
        self.columns.iter().find(|c| c.kind.name() == name)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Returns the latest value of a column.
    #[must_use]
    pub fn latest(&self, kind: IndicatorKind) -> Option<f64> {
        self.column(kind).and_then(IndicatorColumn::latest)
    }

    /// Computes the summary scalars for the latest row.
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary::from_series(self)
    }

    /// Returns the prices and columns.
    #[must_use]
    pub fn into_parts(self) -> (PriceSeries, Vec<IndicatorColumn>) {
        (self.prices, self.columns)
    }
}
