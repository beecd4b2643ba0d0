//! Relative strength oscillator.

use pregao_types::PrecondWindowError;

/// Relative strength index over `window` day-over-day changes.
///
/// Gains and losses are averaged with a trailing simple mean over the last
/// `window` deltas, and `RSI = 100 - 100 / (1 + avg_gain / avg_loss)`.
/// Values lie in `[0, 100]`. An entry is `None` during warm-up (`i < window`)
/// and wherever the trailing average loss is zero: a window without losses
/// has no defined ratio, so it is reported as undefined rather than 100.
///
/// # Errors
///
/// Returns [`PrecondWindowError`] if `window` is zero.
pub fn relative_strength_index(
    closes: &[f64],
    window: usize,
) -> Result<Vec<Option<f64>>, PrecondWindowError> {
    if window == 0 {
        return Err(PrecondWindowError::new("RSI", window));
    }
    Ok(rsi_values(closes, window))
}

pub(crate) fn rsi_values(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut values = vec![None; closes.len()];
    if closes.len() <= window {
        return values;
    }

    // deltas[k] is the change at index k + 1
    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let n = window as f64;

    for (i, value) in values.iter_mut().enumerate().skip(window) {
        let (gain, loss) = deltas[i - window..i]
            .iter()
            .fold((0.0_f64, 0.0_f64), |(g, l), &d| {
                (g + d.max(0.0), l + (-d).max(0.0))
            });
        *value = oscillator(gain / n, loss / n);
    }
    values
}

/// Converts average gain / average loss into an RSI value.
fn oscillator(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        return None;
    }
    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_warm_up() {
        let closes: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 10.0 } else { 11.0 }).collect();
        let values = relative_strength_index(&closes, 14).unwrap();

        assert_eq!(values.len(), 20);
        assert!(values[..14].iter().all(Option::is_none));
        assert!(values[14..].iter().all(Option::is_some));
    }

    #[test]
    fn test_insufficient_data() {
        let closes: Vec<f64> = (1..=14).map(f64::from).collect();
        let values = relative_strength_index(&closes, 14).unwrap();
        assert!(values.iter().all(Option::is_none));
    }

    #[test]
    fn test_zero_losses_is_undefined() {
        // 25 closes rising by 1 per day: no losses in any trailing window.
        let closes: Vec<f64> = (100..125).map(f64::from).collect();
        let values = relative_strength_index(&closes, 14).unwrap();

        assert_eq!(values.len(), 25);
        assert!(values.iter().all(Option::is_none));
    }

    #[test]
    fn test_flat_series_is_undefined() {
        let values = relative_strength_index(&[5.0; 20], 14).unwrap();
        assert!(values.iter().all(Option::is_none));
    }

    #[test]
    fn test_all_losses_is_zero() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 - f64::from(i)).collect();
        let values = relative_strength_index(&closes, 14).unwrap();
        assert_relative_eq!(values[19].unwrap(), 0.0);
    }

    #[test]
    fn test_mostly_rising_approaches_100() {
        // +1 per day with a single -0.5 dip at index 2.
        let mut closes = vec![100.0, 101.0, 100.5];
        for i in 0..13 {
            closes.push(101.5 + f64::from(i));
        }
        let values = relative_strength_index(&closes, 14).unwrap();

        // avg_gain 13/14, avg_loss 0.5/14 -> RS 26
        let last = values[15].unwrap();
        assert_relative_eq!(last, 100.0 - 100.0 / 27.0, epsilon = 1e-9);
        assert!(last > 90.0 && last < 100.0);

        for value in values.iter().flatten() {
            assert!((0.0..=100.0).contains(value));
        }
    }

    #[test]
    fn test_known_value() {
        // window 2: deltas +2, -1 -> avg_gain 1, avg_loss 0.5, RS 2, RSI 66.67
        let values = relative_strength_index(&[10.0, 12.0, 11.0], 2).unwrap();
        assert_eq!(values[..2], [None, None]);
        assert_relative_eq!(values[2].unwrap(), 200.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(relative_strength_index(&[1.0, 2.0], 0).is_err());
    }
}
