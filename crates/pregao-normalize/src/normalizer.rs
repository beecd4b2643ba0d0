//! Raw table to canonical price series.

use pregao_types::{DataShapeError, PriceBar, PriceSeries};
use tracing::debug;

use crate::resolve::resolve_labels;
use crate::{ColumnResolution, Field, RawTable};

/// Output of [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Canonical daily bars.
    pub series: PriceSeries,
    /// How the raw column labels were resolved.
    pub resolution: ColumnResolution,
    /// Rows dropped because their close was undefined or their date did
    /// not follow the previous kept row.
    pub dropped_rows: usize,
}

impl Normalized {
    const fn empty(resolution: ColumnResolution) -> Self {
        Self {
            series: PriceSeries::empty(),
            resolution,
            dropped_rows: 0,
        }
    }
}

/// Normalizes a raw price table into a canonical [`PriceSeries`].
///
/// Column labels are resolved to field names (see [`ColumnResolution`]),
/// duplicated fields are coalesced row by row taking the first defined value
/// in declared order, every canonical cell is coerced to a float, and rows
/// without a close are dropped. A row whose date is not strictly after the
/// previous kept row is dropped too. Malformed cells never fail the call;
/// they become undefined.
///
/// A table with zero rows, no column resolving to `Close`, or rows that all
/// lack a close yields an empty series.
///
/// # Errors
///
/// Returns a [`DataShapeError`] when the column structure cannot be
/// resolved: flat and two-level labels are mixed, or a column length differs
/// from the index length.
pub fn normalize(table: &RawTable) -> Result<Normalized, DataShapeError> {
    if table.is_empty() {
        let resolution =
            resolve_labels(table.columns()).map_or(ColumnResolution::Flat, |(mode, _)| mode);
        debug!(%resolution, "raw table has no rows");
        return Ok(Normalized::empty(resolution));
    }

    let rows = table.row_count();
    if let Some(column) = table.columns().iter().find(|c| c.cells.len() != rows) {
        return Err(DataShapeError::RaggedColumn {
            column: column.label.to_string(),
            expected: rows,
            actual: column.cells.len(),
        });
    }

    let (resolution, names) = resolve_labels(table.columns())?;
    if resolution.is_degraded() {
        debug!(columns = ?names, "no level holds all OHLCV fields, using joined names");
    }

    let [open, high, low, close, volume] =
        [Field::Open, Field::High, Field::Low, Field::Close, Field::Volume]
            .map(|field| coalesce(table, &names, field));
    let Some(closes) = close else {
        debug!(
            %resolution,
            columns = ?unique_names(&names),
            rows,
            "no column resolves to Close, dropping every row"
        );
        return Ok(Normalized {
            series: PriceSeries::empty(),
            resolution,
            dropped_rows: rows,
        });
    };

    let mut bars: Vec<PriceBar> = Vec::with_capacity(rows);
    let mut out_of_order = 0_usize;
    for (row, &date) in table.index().iter().enumerate() {
        let Some(close) = closes[row] else {
            continue;
        };
        if bars.last().is_some_and(|last| date <= last.date) {
            debug!(row, %date, "dropping row not after the previous kept date");
            out_of_order += 1;
            continue;
        }
        let cell = |column: &Option<Vec<Option<f64>>>| column.as_ref().and_then(|c| c[row]);
        bars.push(PriceBar::new(
            date,
            cell(&open),
            cell(&high),
            cell(&low),
            close,
            cell(&volume),
        ));
    }

    let dropped_rows = rows - bars.len();
    let series = PriceSeries::new(bars)?;
    debug!(
        %resolution,
        rows,
        kept = series.len(),
        dropped_rows,
        out_of_order,
        "normalized raw table"
    );

    Ok(Normalized {
        series,
        resolution,
        dropped_rows,
    })
}

/// Coerces and coalesces every column resolved to `field`.
///
/// Returns `None` when no column carries the field name.
fn coalesce(table: &RawTable, names: &[String], field: Field) -> Option<Vec<Option<f64>>> {
    let sources: Vec<_> = table
        .columns()
        .iter()
        .zip(names)
        .filter(|(_, name)| name.as_str() == field.as_str())
        .map(|(column, _)| column)
        .collect();

    if sources.is_empty() {
        return None;
    }
    if sources.len() > 1 {
        debug!(%field, duplicates = sources.len(), "collapsing duplicate columns");
    }

    let values = (0..table.row_count())
        .map(|row| sources.iter().find_map(|column| column.cells[row].to_f64()))
        .collect();
    Some(values)
}

fn unique_names(names: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !unique.contains(name) {
            unique.push(name.clone());
        }
    }
    unique
}
