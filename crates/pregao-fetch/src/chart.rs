//! Yahoo Finance chart payload decoding.

use chrono::{DateTime, NaiveDate};
use pregao_normalize::{ColumnLabel, RawCell, RawTable};
use serde::Deserialize;
use tracing::debug;

use crate::FetchError;

/// Error code Yahoo uses for unknown or delisted symbols.
const NOT_FOUND_CODE: &str = "Not Found";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    symbol: String,
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
    #[serde(default)]
    adjclose: Vec<AdjClose>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Quote {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

/// Decodes a chart response body into a two-level `(field, symbol)` table.
///
/// Returns `None` when the provider reports the symbol as not found or the
/// payload holds no rows. With `auto_adjust`, open/high/low/close are scaled
/// by `adjclose / close` and no separate adjusted column is emitted.
pub(crate) fn decode_chart(body: &str, auto_adjust: bool) -> Result<Option<RawTable>, FetchError> {
    let response: ChartResponse = serde_json::from_str(body)?;

    if let Some(error) = response.chart.error {
        if error.code == NOT_FOUND_CODE {
            debug!(description = %error.description, "provider has no such symbol");
            return Ok(None);
        }
        return Err(FetchError::Provider {
            code: error.code,
            description: error.description,
        });
    }

    let Some(data) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(None);
    };
    if data.timestamp.is_empty() {
        return Ok(None);
    }
    Ok(Some(build_table(data, auto_adjust)))
}

fn build_table(data: ChartData, auto_adjust: bool) -> RawTable {
    let ChartData {
        meta,
        timestamp,
        indicators,
    } = data;
    let quote = indicators.quote.into_iter().next().unwrap_or_default();
    let adjclose = indicators
        .adjclose
        .into_iter()
        .next()
        .map(|a| a.adjclose)
        .unwrap_or_default();

    let rows = session_rows(&timestamp, meta.gmtoffset);
    let index: Vec<NaiveDate> = rows.iter().map(|&(date, _)| date).collect();
    let pick = |values: &[Option<f64>]| -> Vec<Option<f64>> {
        rows.iter()
            .map(|&(_, i)| values.get(i).copied().flatten())
            .collect()
    };

    let close = pick(&quote.close);
    let adj = pick(&adjclose);
    let factor: Vec<Option<f64>> = close
        .iter()
        .zip(&adj)
        .map(|(c, a)| match (c, a) {
            (Some(c), Some(a)) if *c != 0.0 => Some(a / c),
            _ => None,
        })
        .collect();
    let scale = |values: Vec<Option<f64>>| -> Vec<Option<f64>> {
        if !auto_adjust {
            return values;
        }
        values
            .into_iter()
            .zip(&factor)
            .map(|(v, f)| Some(v? * f.unwrap_or(1.0)))
            .collect()
    };

    let symbol = meta.symbol.as_str();
    let cells = |values: Vec<Option<f64>>| -> Vec<RawCell> {
        values.into_iter().map(RawCell::from).collect()
    };

    let mut table = RawTable::new(index)
        .with_column(ColumnLabel::nested("Open", symbol), cells(scale(pick(&quote.open))))
        .with_column(ColumnLabel::nested("High", symbol), cells(scale(pick(&quote.high))))
        .with_column(ColumnLabel::nested("Low", symbol), cells(scale(pick(&quote.low))))
        .with_column(ColumnLabel::nested("Close", symbol), cells(scale(close)));
    if !auto_adjust {
        table.push_column(ColumnLabel::nested("Adj Close", symbol), cells(adj));
    }
    table.push_column(ColumnLabel::nested("Volume", symbol), cells(pick(&quote.volume)));

    debug!(symbol, rows = table.row_count(), auto_adjust, "decoded chart payload");
    table
}

/// Maps timestamps to exchange-local calendar dates.
///
/// Returns `(date, position)` pairs. When two timestamps fall on the same
/// day (a live session appended after the daily bar), the later one wins.
fn session_rows(timestamps: &[i64], gmtoffset: i64) -> Vec<(NaiveDate, usize)> {
    let mut rows: Vec<(NaiveDate, usize)> = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let Some(date) = DateTime::from_timestamp(ts + gmtoffset, 0).map(|dt| dt.date_naive())
        else {
            continue;
        };
        match rows.last_mut() {
            Some(last) if last.0 == date => last.1 = i,
            _ => rows.push((date, i)),
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pregao_normalize::normalize;

    // 2024-03-01 and 2024-03-04 at 13:00 UTC, plus a live tick on 03-04.
    const BODY: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "PETR4.SA", "gmtoffset": -10800, "currency": "BRL"},
                "timestamp": [1709298000, 1709557200, 1709575200],
                "indicators": {
                    "quote": [{
                        "open": [37.0, 38.0, 38.5],
                        "high": [38.0, 39.0, 39.5],
                        "low": [36.5, 37.5, 38.0],
                        "close": [37.5, null, 39.0],
                        "volume": [1000, 2000, 2500]
                    }],
                    "adjclose": [{"adjclose": [30.0, null, 39.0]}]
                }
            }],
            "error": null
        }
    }"#;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_decode_keeps_last_tick_per_day() {
        let table = decode_chart(BODY, false).unwrap().unwrap();

        assert_eq!(table.index(), &[date(3, 1), date(3, 4)]);
        assert_eq!(table.columns().len(), 6);

        let series = normalize(&table).unwrap().series;
        assert_eq!(series.closes(), vec![37.5, 39.0]);
        assert_eq!(series.bars()[1].volume, Some(2500.0));
    }

    #[test]
    fn test_auto_adjust_scales_prices() {
        let table = decode_chart(BODY, true).unwrap().unwrap();
        let normalized = normalize(&table).unwrap();
        let first = normalized.series.bars()[0];

        assert_eq!(table.columns().len(), 5);
        assert_relative_eq!(first.close, 30.0, epsilon = 1e-9);
        assert_relative_eq!(first.open.unwrap(), 37.0 * 0.8, epsilon = 1e-9);
        assert_eq!(first.volume, Some(1000.0));
    }

    #[test]
    fn test_gmtoffset_shifts_dates() {
        // 2024-03-02 01:00 UTC is still 2024-03-01 in Sao Paulo.
        let rows = session_rows(&[1_709_341_200], -10_800);
        assert_eq!(rows, vec![(date(3, 1), 0)]);
    }

    #[test]
    fn test_not_found_is_none() {
        let body = r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}}"#;
        assert!(decode_chart(body, true).unwrap().is_none());
    }

    #[test]
    fn test_other_provider_error() {
        let body = r#"{"chart": {"result": null, "error": {"code": "Bad Request", "description": "Invalid input"}}}"#;
        assert!(matches!(
            decode_chart(body, true),
            Err(FetchError::Provider { code, .. }) if code == "Bad Request"
        ));
    }

    #[test]
    fn test_empty_result_is_none() {
        let body = r#"{"chart": {"result": [{"meta": {"symbol": "PETR4.SA"}, "indicators": {"quote": [{}]}}], "error": null}}"#;
        assert!(decode_chart(body, true).unwrap().is_none());
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(decode_chart("<html>", true), Err(FetchError::Decode(_))));
    }
}
