//! Simple and exponential moving averages.
//!
//! Both families share one warm-up rule: an average over `n` closes is
//! undefined until `n` closes are available, so the first defined value sits
//! at index `n - 1`.

use pregao_types::PrecondWindowError;
use serde::{Deserialize, Serialize};

/// How the exponential recursion is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmaSeed {
    /// `ema[span - 1]` is the simple mean of the first `span` closes.
    #[default]
    SimpleMean,
    /// The recursion starts at `close[0]` and is only masked during warm-up.
    FirstClose,
}

impl EmaSeed {
    /// Returns the seed policy as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SimpleMean => "simple_mean",
            Self::FirstClose => "first_close",
        }
    }
}

impl std::fmt::Display for EmaSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trailing arithmetic mean of `window` closes.
///
/// Entry `i` is the mean of `closes[i + 1 - window..=i]`, or `None` for
/// `i < window - 1`. The output has one entry per close.
///
/// # Errors
///
/// Returns [`PrecondWindowError`] if `window` is zero.
pub fn simple_moving_average(
    closes: &[f64],
    window: usize,
) -> Result<Vec<Option<f64>>, PrecondWindowError> {
    if window == 0 {
        return Err(PrecondWindowError::new("SMA", window));
    }
    Ok(sma_values(closes, window))
}

/// Exponentially weighted mean with `α = 2 / (span + 1)`.
///
/// Undefined for `i < span - 1`; from there on
/// `ema[i] = α·close[i] + (1 − α)·ema[i − 1]`, started according to `seed`.
///
/// # Errors
///
/// Returns [`PrecondWindowError`] if `span` is zero.
pub fn exponential_moving_average(
    closes: &[f64],
    span: usize,
    seed: EmaSeed,
) -> Result<Vec<Option<f64>>, PrecondWindowError> {
    if span == 0 {
        return Err(PrecondWindowError::new("EMA", span));
    }
    Ok(ema_values(closes, span, seed))
}

pub(crate) fn sma_values(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut values = vec![None; closes.len()];
    let n = window as f64;
    for (i, trailing) in closes.windows(window).enumerate() {
        values[i + window - 1] = Some(trailing.iter().sum::<f64>() / n);
    }
    values
}

pub(crate) fn ema_values(closes: &[f64], span: usize, seed: EmaSeed) -> Vec<Option<f64>> {
    let mut values = vec![None; closes.len()];
    if closes.len() < span {
        return values;
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let step = |prev: f64, close: f64| alpha.mul_add(close, (1.0 - alpha) * prev);

    let mut ema = match seed {
        EmaSeed::SimpleMean => closes[..span].iter().sum::<f64>() / span as f64,
        EmaSeed::FirstClose => closes[1..span].iter().fold(closes[0], |e, &c| step(e, c)),
    };
    values[span - 1] = Some(ema);

    for (i, &close) in closes.iter().enumerate().skip(span) {
        ema = step(ema, close);
        values[i] = Some(ema);
    }
    values
}
