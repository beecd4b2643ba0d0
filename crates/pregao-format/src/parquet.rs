//! Apache Parquet output format.

use arrow::array::{ArrayRef, Date32Array, Float64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::Datelike;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use pregao_indicators::IndicatorSeries;
use std::io::Write;
use std::sync::Arc;

use crate::table::{DATE_COLUMN, headers};
use crate::{FormatError, Formatter};

/// Days from 0001-01-01 to 1970-01-01.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Parquet formatter.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Creates the Arrow schema: a `Date32` date and nullable `Float64` values.
    fn schema(headers: &[String]) -> Schema {
        let fields: Vec<Field> = headers
            .iter()
            .map(|name| {
                if name.as_str() == DATE_COLUMN {
                    Field::new(name, DataType::Date32, false)
                } else {
                    Field::new(name, DataType::Float64, true)
                }
            })
            .collect();
        Schema::new(fields)
    }

    /// Converts rows `start..end` of the series to an Arrow RecordBatch.
    fn to_batch(
        series: &IndicatorSeries,
        schema: &Arc<Schema>,
        start: usize,
        end: usize,
    ) -> Result<RecordBatch, FormatError> {
        let bars = &series.prices().bars()[start..end];

        let dates: Vec<i32> = bars
            .iter()
            .map(|b| b.date.num_days_from_ce() - EPOCH_DAYS_FROM_CE)
            .collect();
        let mut columns: Vec<ArrayRef> = vec![
            Arc::new(Date32Array::from(dates)),
            Arc::new(Float64Array::from(bars.iter().map(|b| b.open).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(bars.iter().map(|b| b.high).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(bars.iter().map(|b| b.low).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(bars.iter().map(|b| b.close).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(bars.iter().map(|b| b.volume).collect::<Vec<_>>())),
        ];
        for column in series.columns() {
            columns.push(Arc::new(Float64Array::from(column.values[start..end].to_vec())));
        }

        RecordBatch::try_new(Arc::clone(schema), columns)
            .map_err(|e| FormatError::Parquet(e.to_string()))
    }
}

impl Formatter for ParquetFormatter {
    fn write_series<W: Write + Send>(
        &self,
        series: &IndicatorSeries,
        writer: W,
    ) -> Result<(), FormatError> {
        let schema = Arc::new(Self::schema(&headers(series)));
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer = ArrowWriter::try_new(writer, Arc::clone(&schema), Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        let rows = series.len();
        let step = self.row_group_size.max(1);
        for start in (0..rows).step_by(step) {
            let batch = Self::to_batch(series, &schema, start, (start + step).min(rows))?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}
