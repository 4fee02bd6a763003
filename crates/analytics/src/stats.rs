//! Scalar building blocks shared by every analytics module.
//!
//! All helpers map indeterminate results (empty input, zero denominators,
//! NaN or infinite intermediates) to `None`.

use std::cmp::Ordering;

/// Direction of an explicit, caller-requested sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Keeps `value` only when it is a finite number.
pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// `numerator / denominator`, undefined for a zero denominator.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    finite(numerator / denominator)
}

/// Relative change from `from` to `to`, expressed in percent.
pub fn percent_change(from: f64, to: f64) -> Option<f64> {
    ratio(to - from, from).map(|r| r * 100.0)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    finite(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by `n`, not `n - 1`).
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    finite(variance.sqrt())
}

/// Median with the two-middle-average rule for an even count.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() || values.iter().any(|v| v.is_nan()) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    let value = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };
    finite(value)
}

pub fn min(values: &[f64]) -> Option<f64> {
    extreme(values, f64::min)
}

pub fn max(values: &[f64]) -> Option<f64> {
    extreme(values, f64::max)
}

fn extreme(values: &[f64], pick: fn(f64, f64) -> f64) -> Option<f64> {
    let (first, rest) = values.split_first()?;
    if values.iter().any(|v| v.is_nan()) {
        return None;
    }
    finite(rest.iter().copied().fold(*first, pick))
}

/// Unwraps a series of optional values, or `None` if any one is undefined.
pub(crate) fn all_defined(values: &[Option<f64>]) -> Option<Vec<f64>> {
    values.iter().copied().collect()
}

/// Orders two optional metrics so that undefined values always sort last,
/// whatever the requested direction.
pub(crate) fn compare_optional(a: Option<f64>, b: Option<f64>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => match order {
            SortOrder::Ascending => x.total_cmp(&y),
            SortOrder::Descending => y.total_cmp(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_guards_zero_and_non_finite() {
        assert_eq!(ratio(1.0, 0.0), None);
        assert_eq!(ratio(0.0, 0.0), None);
        assert_eq!(ratio(f64::NAN, 2.0), None);
        assert_eq!(ratio(3.0, 2.0), Some(1.5));
    }

    #[test]
    fn median_even_and_odd() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[1.0, f64::NAN]), None);
    }

    #[test]
    fn std_dev_is_population() {
        // Sample std-dev of this set would be ~2.138, population is exactly 2.
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(population_std_dev(&values), Some(2.0));
        assert_eq!(population_std_dev(&[]), None);
    }

    #[test]
    fn extremes_reject_nan() {
        assert_eq!(min(&[3.0, -1.0, 2.0]), Some(-1.0));
        assert_eq!(max(&[3.0, -1.0, 2.0]), Some(3.0));
        assert_eq!(max(&[1.0, f64::NAN]), None);
        assert_eq!(min(&[]), None);
    }

    #[test]
    fn undefined_sorts_last_both_ways() {
        assert_eq!(compare_optional(None, Some(1.0), SortOrder::Ascending), Ordering::Greater);
        assert_eq!(compare_optional(None, Some(1.0), SortOrder::Descending), Ordering::Greater);
        assert_eq!(compare_optional(Some(1.0), Some(2.0), SortOrder::Descending), Ordering::Greater);
    }
}
