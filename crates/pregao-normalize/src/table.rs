//! Raw tabular price data as returned by market data providers.

use chrono::NaiveDate;

/// Label of a raw column: a plain name or a two-level `(outer, inner)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnLabel {
    /// Single-level name, e.g. `Close`.
    Flat(String),
    /// Two-level name, e.g. `(Close, PETR4.SA)`.
    Nested(String, String),
}

impl ColumnLabel {
    /// Creates a single-level label.
    #[must_use]
    pub fn flat(name: impl Into<String>) -> Self {
        Self::Flat(name.into())
    }

    /// Creates a two-level label.
    #[must_use]
    pub fn nested(outer: impl Into<String>, inner: impl Into<String>) -> Self {
        Self::Nested(outer.into(), inner.into())
    }

    /// Returns true for two-level labels.
    #[must_use]
    pub const fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(..))
    }
}

impl From<&str> for ColumnLabel {
    fn from(name: &str) -> Self {
        Self::flat(name)
    }
}

impl From<(&str, &str)> for ColumnLabel {
    fn from((outer, inner): (&str, &str)) -> Self {
        Self::nested(outer, inner)
    }
}

impl std::fmt::Display for ColumnLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flat(name) => f.write_str(name),
            Self::Nested(outer, inner) => write!(f, "({outer}, {inner})"),
        }
    }
}

/// A single raw cell.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    /// Numeric value.
    Number(f64),
    /// Textual value, parsed on coercion.
    Text(String),
    /// Missing value.
    Null,
}

impl RawCell {
    /// Coerces the cell to a finite float.
    ///
    /// Text is trimmed and parsed; anything unparsable, missing or
    /// non-finite becomes `None`.
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(v) => *v,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Null => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Option<f64>> for RawCell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A labelled column of raw cells.
#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    /// Column label.
    pub label: ColumnLabel,
    /// Cells, one per index entry.
    pub cells: Vec<RawCell>,
}

impl RawColumn {
    /// Creates a new column.
    #[must_use]
    pub fn new(label: impl Into<ColumnLabel>, cells: Vec<RawCell>) -> Self {
        Self {
            label: label.into(),
            cells,
        }
    }
}

/// A raw price table: a date index plus columns in declared order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    index: Vec<NaiveDate>,
    columns: Vec<RawColumn>,
}

impl RawTable {
    /// Creates a table with the given date index and no columns.
    #[must_use]
    pub const fn new(index: Vec<NaiveDate>) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    /// Appends a column, builder style.
    #[must_use]
    pub fn with_column(mut self, label: impl Into<ColumnLabel>, cells: Vec<RawCell>) -> Self {
        self.push_column(label, cells);
        self
    }

    /// Appends a column.
    pub fn push_column(&mut self, label: impl Into<ColumnLabel>, cells: Vec<RawCell>) {
        self.columns.push(RawColumn::new(label, cells));
    }

    /// Returns the date index.
    #[must_use]
    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    /// Returns the columns in declared order.
    #[must_use]
    pub fn columns(&self) -> &[RawColumn] {
        &self.columns
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_coercion() {
        assert_eq!(RawCell::Number(1.5).to_f64(), Some(1.5));
        assert_eq!(RawCell::from(" 37.12 ").to_f64(), Some(37.12));
        assert_eq!(RawCell::from("n/a").to_f64(), None);
        assert_eq!(RawCell::Null.to_f64(), None);
        assert_eq!(RawCell::Number(f64::NAN).to_f64(), None);
        assert_eq!(RawCell::from("inf").to_f64(), None);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(ColumnLabel::from("Close").to_string(), "Close");
        assert_eq!(
            ColumnLabel::from(("Close", "PETR4.SA")).to_string(),
            "(Close, PETR4.SA)"
        );
    }

    #[test]
    fn test_table_builder() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let table = RawTable::new(vec![day]).with_column("Close", vec![RawCell::from(10.0)]);

        assert_eq!(table.row_count(), 1);
        assert_eq!(table.columns().len(), 1);
        assert!(!table.columns()[0].label.is_nested());
    }
}
