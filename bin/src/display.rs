//! Display utilities and output formatting for the pregao CLI.

use anyhow::Result;
use clap::ValueEnum;
use pregao_lib::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Output format for the indicator table.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
    Parquet,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }

    /// Picks the format from the flag, then the path's extension, then CSV.
    pub(crate) fn resolve(flag: Option<Self>, path: &Path) -> Self {
        flag.or_else(|| OutputFormat::from_path(path).map(Self::from))
            .unwrap_or(Self::Csv)
    }
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => Self::Csv,
            OutputFormat::Json => Self::Json,
            OutputFormat::Ndjson => Self::Ndjson,
            OutputFormat::Parquet => Self::Parquet,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// EMA seeding choice on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum SeedArg {
    /// Seed with the mean of the first `span` closes.
    Mean,
    /// Seed with the first close.
    First,
}

impl From<SeedArg> for EmaSeed {
    fn from(seed: SeedArg) -> Self {
        match seed {
            SeedArg::Mean => Self::SimpleMean,
            SeedArg::First => Self::FirstClose,
        }
    }
}

/// Write an indicator table to a file in the specified format.
pub(crate) fn write_series(series: &IndicatorSeries, output: &Path, format: Format) -> Result<()> {
    let file = File::create(output)?;
    let writer = BufWriter::new(file);

    match format {
        Format::Csv => CsvFormatter::new().write_series(series, writer)?,
        Format::Json => JsonFormatter::new().write_series(series, writer)?,
        Format::Ndjson => JsonFormatter::ndjson().write_series(series, writer)?,
        Format::Parquet => {
            #[cfg(feature = "parquet")]
            {
                ParquetFormatter::new().write_series(series, writer)?;
            }
            #[cfg(not(feature = "parquet"))]
            {
                drop(writer);
                anyhow::bail!("Parquet support not compiled in");
            }
        }
    }

    Ok(())
}

/// Formats an amount as Brazilian reais, e.g. `R$ 1.234,56`.
pub(crate) fn format_brl(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac_part}")
}

/// Formats an optional percentage with an explicit sign, or `n/a`.
pub(crate) fn format_percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:+.2}%"))
}

/// Formats an optional number with two decimals, or `n/a`.
pub(crate) fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(38.5), "R$ 38,50");
        assert_eq!(format_brl(1234.5), "R$ 1.234,50");
        assert_eq!(format_brl(1_234_567.25), "R$ 1.234.567,25");
        assert_eq!(format_brl(-12.25), "-R$ 12,25");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(8.3)), "+8.30%");
        assert_eq!(format_percent(Some(-1.25)), "-1.25%");
        assert_eq!(format_percent(None), "n/a");
    }

    #[test]
    fn test_resolve_format() {
        let path = Path::new("out/petr4.parquet");
        assert_eq!(Format::resolve(None, path).extension(), "parquet");
        assert_eq!(Format::resolve(Some(Format::Json), path).extension(), "json");
        assert_eq!(Format::resolve(None, Path::new("petr4.txt")).extension(), "csv");
        assert_eq!(Format::resolve(None, Path::new("petr4")).extension(), "csv");
    }
}
