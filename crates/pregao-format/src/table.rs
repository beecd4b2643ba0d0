//! Row view shared by the writers.

use chrono::NaiveDate;
use pregao_indicators::IndicatorSeries;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Names of the price columns, in output order.
pub(crate) const PRICE_COLUMNS: [&str; 5] = ["Open", "High", "Low", "Close", "Volume"];

/// Header of the date column.
pub(crate) const DATE_COLUMN: &str = "Date";

/// Returns every column header in output order.
pub(crate) fn headers(series: &IndicatorSeries) -> Vec<String> {
    std::iter::once(DATE_COLUMN.to_string())
        .chain(PRICE_COLUMNS.iter().map(|c| (*c).to_string()))
        .chain(series.columns().iter().map(|c| c.kind.name()))
        .collect()
}

/// One output row; `values` follows `headers()` minus the date.
pub(crate) struct Row<'a> {
    pub(crate) date: NaiveDate,
    pub(crate) values: Vec<Option<f64>>,
    pub(crate) headers: &'a [String],
}

/// Iterates the rows of `series`, labelled with `headers`.
pub(crate) fn rows<'a>(
    series: &'a IndicatorSeries,
    headers: &'a [String],
) -> impl Iterator<Item = Row<'a>> + 'a {
    series.prices().iter().enumerate().map(move |(i, bar)| {
        let mut values = vec![bar.open, bar.high, bar.low, Some(bar.close), bar.volume];
        values.extend(series.columns().iter().map(|c| c.values[i]));
        Row {
            date: bar.date,
            values,
            headers,
        }
    })
}

impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.headers.len()))?;
        map.serialize_entry(DATE_COLUMN, &self.date.format("%Y-%m-%d").to_string())?;
        for (name, value) in self.headers.iter().skip(1).zip(&self.values) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
