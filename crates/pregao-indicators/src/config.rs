//! Indicator configuration.

use pregao_types::PrecondWindowError;
use serde::{Deserialize, Serialize};

use crate::EmaSeed;

/// A derived column produced by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    /// Simple moving average over the given window.
    Sma(usize),
    /// Exponential moving average with the given span.
    Ema(usize),
    /// Relative strength index over the given window.
    Rsi(usize),
}

impl IndicatorKind {
    /// Returns the canonical column name, e.g. `SMA20`.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Sma(w) => format!("SMA{w}"),
            Self::Ema(s) => format!("EMA{s}"),
            Self::Rsi(w) => format!("RSI{w}"),
        }
    }

    /// Returns the window or span length.
    #[must_use]
    pub const fn window(&self) -> usize {
        match self {
            Self::Sma(n) | Self::Ema(n) | Self::Rsi(n) => *n,
        }
    }

    /// Returns true for price-level averages (SMA and EMA).
    #[must_use]
    pub const fn is_moving_average(&self) -> bool {
        matches!(self, Self::Sma(_) | Self::Ema(_))
    }
}

impl std::fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

/// Which indicators to compute and with which windows.
///
/// Deserializes from JSON with every field optional:
///
/// ```
/// use pregao_indicators::IndicatorConfig;
///
/// let config: IndicatorConfig = serde_json::from_str(r#"{"sma_windows": [9, 21]}"#).unwrap();
/// assert_eq!(config.sma_windows, vec![9, 21]);
/// assert_eq!(config.rsi_window, 14);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Simple moving average windows.
    pub sma_windows: Vec<usize>,
    /// Exponential moving average spans.
    pub ema_spans: Vec<usize>,
    /// RSI window.
    pub rsi_window: usize,
    /// EMA seed policy.
    pub ema_seed: EmaSeed,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_windows: vec![20, 50, 200],
            ema_spans: vec![20],
            rsi_window: 14,
            ema_seed: EmaSeed::default(),
        }
    }
}

impl IndicatorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the SMA windows.
    #[must_use]
    pub fn with_sma_windows(mut self, windows: impl Into<Vec<usize>>) -> Self {
        self.sma_windows = windows.into();
        self
    }

    /// Sets the EMA spans.
    #[must_use]
    pub fn with_ema_spans(mut self, spans: impl Into<Vec<usize>>) -> Self {
        self.ema_spans = spans.into();
        self
    }

    /// Sets the RSI window.
    #[must_use]
    pub const fn with_rsi_window(mut self, window: usize) -> Self {
        self.rsi_window = window;
        self
    }

    /// Sets the EMA seed policy.
    #[must_use]
    pub const fn with_ema_seed(mut self, seed: EmaSeed) -> Self {
        self.ema_seed = seed;
        self
    }

    /// Checks that every window and span is positive.
    ///
    /// # Errors
    ///
    /// Returns [`PrecondWindowError`] naming the first offending indicator.
    pub fn validate(&self) -> Result<(), PrecondWindowError> {
        if let Some(&w) = self.sma_windows.iter().find(|&&w| w == 0) {
            return Err(PrecondWindowError::new("SMA", w));
        }
        if let Some(&s) = self.ema_spans.iter().find(|&&s| s == 0) {
            return Err(PrecondWindowError::new("EMA", s));
        }
        if self.rsi_window == 0 {
            return Err(PrecondWindowError::new("RSI", self.rsi_window));
        }
        Ok(())
    }

    /// Returns the configured columns in engine order: SMAs, EMAs, then RSI.
    ///
    /// Repeated windows produce a single column.
    #[must_use]
    pub fn kinds(&self) -> Vec<IndicatorKind> {
        let candidates = self
            .sma_windows
            .iter()
            .map(|&w| IndicatorKind::Sma(w))
            .chain(self.ema_spans.iter().map(|&s| IndicatorKind::Ema(s)))
            .chain(std::iter::once(IndicatorKind::Rsi(self.rsi_window)));

        let mut kinds = Vec::new();
        for kind in candidates {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds
    }

    /// Returns the shortest configured SMA window.
    #[must_use]
    pub fn shortest_sma(&self) -> Option<usize> {
        self.sma_windows.iter().copied().min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_kinds() {
        let kinds = IndicatorConfig::default().kinds();
        let names: Vec<String> = kinds.iter().map(IndicatorKind::name).collect();

        assert_eq!(names, vec!["SMA20", "SMA50", "SMA200", "EMA20", "RSI14"]);
    }

    #[test]
    fn test_duplicate_windows_collapse() {
        let config = IndicatorConfig::new()
            .with_sma_windows([20, 20, 5])
            .with_ema_spans(Vec::new());

        assert_eq!(
            config.kinds(),
            vec![
                IndicatorKind::Sma(20),
                IndicatorKind::Sma(5),
                IndicatorKind::Rsi(14)
            ]
        );
        assert_eq!(config.shortest_sma(), Some(5));
    }

    #[test]
    fn test_validate_rejects_zero() {
        assert!(IndicatorConfig::default().validate().is_ok());

        let err = IndicatorConfig::new().with_ema_spans([0]).validate().unwrap_err();
        assert_eq!(err, PrecondWindowError::new("EMA", 0));

        let err = IndicatorConfig::new().with_rsi_window(0).validate().unwrap_err();
        assert_eq!(err, PrecondWindowError::new("RSI", 0));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: IndicatorConfig =
            serde_json::from_str(r#"{"ema_spans": [9], "ema_seed": "first_close"}"#).unwrap();

        assert_eq!(config.sma_windows, vec![20, 50, 200]);
        assert_eq!(config.ema_spans, vec![9]);
        assert_eq!(config.ema_seed, EmaSeed::FirstClose);
    }

    #[test]
    fn test_kind_properties() {
        assert_eq!(IndicatorKind::Ema(20).to_string(), "EMA20");
        assert_eq!(IndicatorKind::Rsi(14).window(), 14);
        assert!(IndicatorKind::Sma(50).is_moving_average());
        assert!(!IndicatorKind::Rsi(14).is_moving_average());
    }
}
