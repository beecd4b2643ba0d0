//! CSV output format.

use pregao_indicators::IndicatorSeries;
use std::io::Write;

use crate::table::{headers, rows};
use crate::{FormatError, Formatter};

/// CSV formatter.
#[derive(Debug, Clone, Default)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }
}

impl Formatter for CsvFormatter {
    fn write_series<W: Write + Send>(
        &self,
        series: &IndicatorSeries,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter.to_string();
        let headers = headers(series);

        if self.include_header {
            writeln!(writer, "{}", headers.join(&d))?;
        }

        for row in rows(series, &headers) {
            write!(writer, "{}", row.date.format("%Y-%m-%d"))?;
            for value in &row.values {
                // Undefined values are written as empty fields
                match value {
                    Some(v) => write!(writer, "{d}{v}")?,
                    None => write!(writer, "{d}")?,
                }
            }
            writeln!(writer)?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        if self.delimiter == '\t' { "tsv" } else { "csv" }
    }
}
