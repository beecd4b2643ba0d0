//! JSON output format.

use pregao_indicators::IndicatorSeries;
use std::io::Write;

use crate::table::{Row, headers, rows};
use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
///
/// Each row is an object keyed by column name; undefined values are `null`.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    style: JsonStyle,
    /// Only applies to the array style.
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }
}

impl Formatter for JsonFormatter {
    fn write_series<W: Write + Send>(
        &self,
        series: &IndicatorSeries,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let headers = headers(series);

        match self.style {
            JsonStyle::Array => {
                let all: Vec<Row<'_>> = rows(series, &headers).collect();
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, &all)?;
                } else {
                    serde_json::to_writer(&mut writer, &all)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for row in rows(series, &headers) {
                    serde_json::to_writer(&mut writer, &row)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_series;
    use std::io::Cursor;

    fn render(formatter: &JsonFormatter) -> String {
        let mut output = Cursor::new(Vec::new());
        formatter.write_series(&sample_series(), &mut output).unwrap();
        String::from_utf8(output.into_inner()).unwrap()
    }

    #[test]
    fn test_json_array() {
        let result = render(&JsonFormatter::new());
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();
        let rows = value.as_array().unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["Date"], "2024-03-01");
        assert_eq!(rows[0]["SMA2"], serde_json::Value::Null);
        assert_eq!(rows[2]["Open"], serde_json::Value::Null);
        assert_eq!(rows[2]["RSI2"], 50.0);
    }

    #[test]
    fn test_column_order_preserved() {
        let result = render(&JsonFormatter::ndjson());
        let first = result.lines().next().unwrap();

        assert!(first.starts_with(r#"{"Date":"2024-03-01","Open":9.5,"High":10.5"#));
        assert!(first.ends_with(r#""SMA2":null,"RSI2":null}"#));
    }

    #[test]
    fn test_ndjson() {
        let formatter = JsonFormatter::ndjson();
        let result = render(&formatter);
        let lines: Vec<_> = result.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.starts_with('{')));
        assert_eq!(formatter.extension(), "ndjson");
    }

    #[test]
    fn test_pretty_json() {
        let result = render(&JsonFormatter::new().with_pretty(true));
        assert!(result.contains('\n'));
        assert!(result.contains("  "));
    }
}
