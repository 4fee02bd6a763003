use crate::stats::{all_defined, finite, mean, population_std_dev, ratio};

/// Periods per year assumed when annualizing an average return.
///
/// The sampling interval of the series is never inferred: hourly data is
/// annualized as if it were daily.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Simple period-over-period returns, `r[i] = v[i] / v[i-1] - 1`.
///
/// The output has `n - 1` entries (none for `n <= 1`). A zero previous value
/// leaves that return undefined instead of failing the whole series.
pub fn compute_returns(series: &[f64]) -> Vec<Option<f64>> {
    series
        .windows(2)
        .map(|w| ratio(w[1], w[0]).and_then(|r| finite(r - 1.0)))
        .collect()
}

/// Arithmetic mean of the returns; undefined if any return is.
pub fn average_return(returns: &[Option<f64>]) -> Option<f64> {
    mean(&all_defined(returns)?)
}

/// Population standard deviation of the returns; undefined if any return is.
pub fn return_volatility(returns: &[Option<f64>]) -> Option<f64> {
    population_std_dev(&all_defined(returns)?)
}

/// Largest peak-to-trough decline as a fraction of the running peak.
///
/// A single forward pass seeded with the first value. Always non-negative, and
/// `0.0` for series of length zero or one.
pub fn compute_drawdown(series: &[f64]) -> f64 {
    let Some((&first, rest)) = series.split_first() else {
        return 0.0;
    };

    let mut peak = first;
    let mut max_drawdown = 0.0_f64;
    for &value in rest {
        if value > peak {
            peak = value;
        } else if value < peak && peak > 0.0 {
            let drawdown = (peak - value) / peak;
            if drawdown > max_drawdown {
                max_drawdown = drawdown;
            }
        }
    }
    max_drawdown
}

/// `|average_return / volatility|`, undefined when volatility is zero.
pub fn risk_reward_ratio(avg_return: Option<f64>, volatility: Option<f64>) -> Option<f64> {
    ratio(avg_return?, volatility?).map(f64::abs)
}

/// Scales a per-period average return by [`DAYS_PER_YEAR`].
pub fn annualized_return(avg_return: Option<f64>) -> Option<f64> {
    avg_return.and_then(|r| finite(r * DAYS_PER_YEAR))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: [f64; 5] = [10.0, 20.0, 15.0, 30.0, 12.0];

    fn close(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-12)
    }

    #[test]
    fn fixture_returns() {
        let returns = compute_returns(&FIXTURE);
        let expected = [1.0, -0.25, 1.0, -0.6];
        assert_eq!(returns.len(), 4);
        for (r, e) in returns.iter().zip(expected) {
            assert!(close(*r, e), "{r:?} != {e}");
        }
    }

    #[test]
    fn fixture_drawdown_is_peak_30_to_trough_12() {
        assert!((compute_drawdown(&FIXTURE) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn returns_of_short_series_are_empty() {
        assert!(compute_returns(&[]).is_empty());
        assert!(compute_returns(&[42.0]).is_empty());
    }

    #[test]
    fn zero_denominator_is_undefined_in_place() {
        let returns = compute_returns(&[0.0, 5.0, 10.0]);
        assert_eq!(returns, vec![None, Some(1.0)]);
        assert_eq!(average_return(&returns), None);
        assert_eq!(return_volatility(&returns), None);
    }

    #[test]
    fn drawdown_degenerate_cases() {
        assert_eq!(compute_drawdown(&[]), 0.0);
        assert_eq!(compute_drawdown(&[7.0]), 0.0);
        assert_eq!(compute_drawdown(&[1.0, 2.0, 2.0, 3.0]), 0.0);
        assert_eq!(compute_drawdown(&[4.0, 3.0, 2.0, 1.0]), 0.75);
    }

    #[test]
    fn risk_reward_and_annualization() {
        let returns = compute_returns(&FIXTURE);
        let avg = average_return(&returns);
        let vol = return_volatility(&returns);
        assert!(close(avg, 0.2875));

        let rr = risk_reward_ratio(avg, vol).unwrap();
        assert!((rr - 0.2875 / vol.unwrap()).abs() < 1e-12);
        assert!(close(annualized_return(avg), 0.2875 * 365.0));
    }

    #[test]
    fn zero_volatility_has_no_risk_reward() {
        let returns = compute_returns(&[1.0, 2.0, 4.0, 8.0]);
        let vol = return_volatility(&returns);
        assert_eq!(vol, Some(0.0));
        assert_eq!(risk_reward_ratio(average_return(&returns), vol), None);
        assert_eq!(risk_reward_ratio(None, Some(1.0)), None);
    }

    #[test]
    fn negative_average_gives_positive_ratio() {
        assert_eq!(risk_reward_ratio(Some(-0.5), Some(0.25)), Some(2.0));
    }
}
