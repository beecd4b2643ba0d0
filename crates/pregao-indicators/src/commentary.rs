//! Threshold commentary over the summary scalars.

use serde::{Deserialize, Serialize};

use crate::{IndicatorKind, Summary};

/// Bands used to classify the latest deviation and RSI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentaryThresholds {
    /// Half-width, in percent, of the "near the average" band.
    pub deviation_band: f64,
    /// RSI below this is oversold.
    pub oversold: f64,
    /// RSI above this is overbought.
    pub overbought: f64,
}

impl Default for CommentaryThresholds {
    fn default() -> Self {
        Self {
            deviation_band: 5.0,
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

impl CommentaryThresholds {
    /// Sets the deviation band.
    #[must_use]
    pub const fn with_deviation_band(mut self, band: f64) -> Self {
        self.deviation_band = band;
        self
    }

    /// Sets the RSI oversold and overbought levels.
    #[must_use]
    pub const fn with_rsi_levels(mut self, oversold: f64, overbought: f64) -> Self {
        self.oversold = oversold;
        self.overbought = overbought;
        self
    }
}

/// Position of the latest close relative to a moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendBand {
    /// More than the band below the average.
    Below,
    /// Within the band, bounds included.
    Near,
    /// More than the band above the average.
    Above,
}

impl TrendBand {
    /// Classifies a percent deviation.
    #[must_use]
    pub fn classify(deviation: f64, band: f64) -> Self {
        if deviation < -band {
            Self::Below
        } else if deviation <= band {
            Self::Near
        } else {
            Self::Above
        }
    }

    /// Returns a short label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Below => "below",
            Self::Near => "near",
            Self::Above => "above",
        }
    }

    /// Returns a reader-facing interpretation.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Below => "Price is well below the average: short-term downtrend.",
            Self::Near => "Price is close to the average: market in short-term balance.",
            Self::Above => "Price is above the average: short-term uptrend.",
        }
    }
}

impl std::fmt::Display for TrendBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zone of the latest RSI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiZone {
    /// Below the oversold level.
    Oversold,
    /// Between the levels, bounds included.
    Neutral,
    /// Above the overbought level.
    Overbought,
}

impl RsiZone {
    /// Classifies an RSI value.
    #[must_use]
    pub fn classify(rsi: f64, oversold: f64, overbought: f64) -> Self {
        if rsi < oversold {
            Self::Oversold
        } else if rsi <= overbought {
            Self::Neutral
        } else {
            Self::Overbought
        }
    }

    /// Returns a short label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Oversold => "oversold",
            Self::Neutral => "neutral",
            Self::Overbought => "overbought",
        }
    }

    /// Returns a reader-facing interpretation.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Oversold => "Oversold: the stock fell fast and may be close to a rebound.",
            Self::Neutral => "Neutral: no clear buy or sell signal.",
            Self::Overbought => "Overbought: the price rose a lot and a correction is possible.",
        }
    }
}

impl std::fmt::Display for RsiZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a [`Summary`] against [`CommentaryThresholds`].
///
/// `None` means the underlying value could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Commentary {
    /// Average the trend band refers to.
    pub reference: Option<IndicatorKind>,
    /// Percent deviation from `reference`.
    pub deviation: Option<f64>,
    /// Trend band of `deviation`.
    pub trend: Option<TrendBand>,
    /// Latest RSI.
    pub rsi: Option<f64>,
    /// Zone of `rsi`.
    pub rsi_zone: Option<RsiZone>,
}

impl Commentary {
    /// Classifies `summary`, using the shortest SMA as the trend reference.
    ///
    /// Falls back to the first moving average of any kind when the summary
    /// has no SMA.
    #[must_use]
    pub fn from_summary(summary: &Summary, thresholds: &CommentaryThresholds) -> Self {
        let reference = summary
            .deviations
            .iter()
            .filter_map(|d| match d.kind {
                IndicatorKind::Sma(w) => Some((w, d.kind)),
                _ => None,
            })
            .min_by_key(|(w, _)| *w)
            .map(|(_, kind)| kind)
            .or_else(|| summary.deviations.first().map(|d| d.kind));

        Self::assess(summary, reference, thresholds)
    }

    /// Classifies `summary` against an explicit reference average.
    #[must_use]
    pub fn assess(
        summary: &Summary,
        reference: Option<IndicatorKind>,
        thresholds: &CommentaryThresholds,
    ) -> Self {
        let deviation = reference
            .and_then(|kind| summary.deviation(kind))
            .and_then(|d| d.percent);
        let rsi = summary.latest_rsi;

        Self {
            reference,
            deviation,
            trend: deviation.map(|d| TrendBand::classify(d, thresholds.deviation_band)),
            rsi,
            rsi_zone: rsi
                .map(|r| RsiZone::classify(r, thresholds.oversold, thresholds.overbought)),
        }
    }

    /// Renders one line for the trend and one for the RSI.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let reference = self
            .reference
            .map_or_else(|| "moving average".to_string(), |k| k.name());

        let trend = match (self.trend, self.deviation) {
            (Some(band), Some(deviation)) => {
                format!("{deviation:+.2}% vs {reference}. {}", band.message())
            }
            _ => format!("Could not compute the deviation from {reference}."),
        };
        let rsi = match (self.rsi_zone, self.rsi) {
            (Some(zone), Some(value)) => format!("RSI {value:.1}. {}", zone.message()),
            _ => "Could not compute the RSI.".to_string(),
        };
        vec![trend, rsi]
    }
}
