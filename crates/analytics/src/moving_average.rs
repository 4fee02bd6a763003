use crate::stats::{finite, mean};
use core_types::IndicatorSeries;

/// Simple moving average over a trailing window of `period` samples.
///
/// The output is index-aligned with `series`. The first `period - 1` positions
/// are `None`; a `period` larger than the series (or zero) yields an output that
/// is `None` everywhere, since there is not yet enough history.
pub fn compute_sma(series: &[f64], period: usize) -> IndicatorSeries {
    if !has_history(series, period, "SMA") {
        return vec![None; series.len()];
    }

    let mut sma = Vec::with_capacity(series.len());
    sma.resize(period - 1, None);
    sma.extend(series.windows(period).map(mean));
    sma
}

/// Exponential moving average with smoothing factor `k = 2 / (period + 1)`.
///
/// The seed at index `period - 1` is the SMA of the first `period` samples and
/// the recursion `ema[i] = (price[i] - ema[i-1]) * k + ema[i-1]` runs from there.
/// Early values therefore differ from an EMA recursed from the very first
/// sample.
pub fn compute_ema(series: &[f64], period: usize) -> IndicatorSeries {
    if !has_history(series, period, "EMA") {
        return vec![None; series.len()];
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = Vec::with_capacity(series.len());
    ema.resize(period - 1, None);

    let mut previous = mean(&series[..period]);
    ema.push(previous);
    for &price in &series[period..] {
        previous = previous.and_then(|prev| finite((price - prev) * k + prev));
        ema.push(previous);
    }
    ema
}

/// Whether a window of `period` samples fits into `series` at least once.
pub(crate) fn has_history(series: &[f64], period: usize, name: &str) -> bool {
    if period == 0 || period > series.len() {
        tracing::debug!(
            "{}: insufficient history (period {}, {} samples)",
            name,
            period,
            series.len()
        );
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_series_close(actual: &[Option<f64>], expected: &[Option<f64>]) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            match (a, e) {
                (Some(a), Some(e)) => assert!((a - e).abs() < 1e-9, "index {i}: {a} != {e}"),
                (None, None) => {}
                _ => panic!("index {i}: {a:?} != {e:?}"),
            }
        }
    }

    #[test]
    fn sma_three_period() {
        let sma = compute_sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(sma, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn sma_period_one_is_identity() {
        let series = [4.0, 8.0, 15.0];
        assert_eq!(compute_sma(&series, 1), vec![Some(4.0), Some(8.0), Some(15.0)]);
    }

    #[test]
    fn sma_period_longer_than_series_is_all_undefined() {
        assert_eq!(compute_sma(&[1.0, 2.0], 3), vec![None, None]);
        assert_eq!(compute_sma(&[1.0, 2.0], 0), vec![None, None]);
        assert!(compute_sma(&[], 3).is_empty());
    }

    #[test]
    fn sma_window_with_nan_is_undefined() {
        let sma = compute_sma(&[1.0, f64::NAN, 3.0, 4.0, 5.0], 2);
        assert_eq!(sma, vec![None, None, None, Some(3.5), Some(4.5)]);
    }

    #[test]
    fn ema_seeds_with_sma_then_recurses() {
        // k = 0.5, seed = mean(2, 4, 6) = 4
        let ema = compute_ema(&[2.0, 4.0, 6.0, 8.0, 4.0], 3);
        assert_series_close(&ema, &[None, None, Some(4.0), Some(6.0), Some(5.0)]);
    }

    #[test]
    fn ema_seed_matches_sma() {
        let series = [10.0, 11.5, 9.25, 12.0, 13.5, 12.75];
        let ema = compute_ema(&series, 4);
        let sma = compute_sma(&series, 4);
        assert_eq!(ema[3], sma[3]);
        assert!(ema[..3].iter().all(Option::is_none));
    }

    #[test]
    fn ema_period_longer_than_series_is_all_undefined() {
        assert_eq!(compute_ema(&[1.0, 2.0, 3.0], 4), vec![None, None, None]);
    }

    #[test]
    fn ema_nan_poisons_the_tail() {
        let ema = compute_ema(&[1.0, 1.0, f64::NAN, 1.0], 2);
        assert_eq!(ema, vec![None, Some(1.0), None, None]);
    }
}
