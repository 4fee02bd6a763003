use crate::error::AnalyticsError;
use crate::stats::{self, SortOrder, compare_optional};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scalar aggregates over one extracted field of one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: usize,
    pub first: Option<f64>,
    pub last: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Population standard deviation.
    pub std_dev: Option<f64>,
    /// `(last / first - 1) * 100`, undefined when `first` is zero.
    pub percent_change: Option<f64>,
}

/// A summary tagged with the file or coin it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSummary {
    pub label: String,
    pub stats: SummaryStats,
}

/// Computes every summary statistic independently; an empty series leaves all
/// of them undefined.
pub fn summarize(series: &[f64]) -> SummaryStats {
    let first = series.first().copied().and_then(stats::finite);
    let last = series.last().copied().and_then(stats::finite);
    let percent_change = match (first, last) {
        (Some(first), Some(last)) => stats::percent_change(first, last),
        _ => None,
    };

    SummaryStats {
        count: series.len(),
        first,
        last,
        min: stats::min(series),
        max: stats::max(series),
        mean: stats::mean(series),
        median: stats::median(series),
        std_dev: stats::population_std_dev(series),
        percent_change,
    }
}

/// Summarizes several labelled series, preserving the input order.
pub fn summarize_many<'a, I>(inputs: I) -> Vec<LabeledSummary>
where
    I: IntoIterator<Item = (&'a str, &'a [f64])>,
{
    inputs
        .into_iter()
        .map(|(label, series)| LabeledSummary {
            label: label.to_string(),
            stats: summarize(series),
        })
        .collect()
}

/// A statistic of `SummaryStats` that a comparison table can be ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryMetric {
    Min,
    Max,
    Mean,
    Median,
    StdDev,
    PercentChange,
}

impl SummaryMetric {
    pub fn value(&self, stats: &SummaryStats) -> Option<f64> {
        match self {
            SummaryMetric::Min => stats.min,
            SummaryMetric::Max => stats.max,
            SummaryMetric::Mean => stats.mean,
            SummaryMetric::Median => stats.median,
            SummaryMetric::StdDev => stats.std_dev,
            SummaryMetric::PercentChange => stats.percent_change,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryMetric::Min => "min",
            SummaryMetric::Max => "max",
            SummaryMetric::Mean => "mean",
            SummaryMetric::Median => "median",
            SummaryMetric::StdDev => "std_dev",
            SummaryMetric::PercentChange => "percent_change",
        }
    }
}

impl fmt::Display for SummaryMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryMetric {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "min" => Ok(SummaryMetric::Min),
            "max" => Ok(SummaryMetric::Max),
            "mean" => Ok(SummaryMetric::Mean),
            "median" => Ok(SummaryMetric::Median),
            "std" | "std_dev" => Ok(SummaryMetric::StdDev),
            "percent_change" | "change" => Ok(SummaryMetric::PercentChange),
            _ => Err(AnalyticsError::UnknownMetric(s.to_string())),
        }
    }
}

/// Sorts summaries by `metric`. Stable, with undefined values last.
pub fn sort_summaries(summaries: &mut [LabeledSummary], metric: SummaryMetric, order: SortOrder) {
    summaries.sort_by(|a, b| compare_optional(metric.value(&a.stats), metric.value(&b.stats), order));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn fixture_summary() {
        let stats = summarize(&[10.0, 20.0, 15.0, 30.0, 12.0]);
        assert_eq!(stats.count, 5);
        assert_eq!(stats.min, Some(10.0));
        assert_eq!(stats.max, Some(30.0));
        assert!(close(stats.mean, 17.4));
        assert_eq!(stats.median, Some(15.0));
        assert!(close(stats.percent_change, 20.0));
        assert_eq!(stats.first, Some(10.0));
        assert_eq!(stats.last, Some(12.0));
    }

    #[test]
    fn empty_series_is_all_undefined() {
        let stats = summarize(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.min.is_none() && stats.max.is_none());
        assert!(stats.mean.is_none() && stats.median.is_none());
        assert!(stats.std_dev.is_none() && stats.percent_change.is_none());
    }

    #[test]
    fn single_sample_has_zero_change() {
        let stats = summarize(&[42.0]);
        assert_eq!(stats.percent_change, Some(0.0));
        assert_eq!(stats.std_dev, Some(0.0));
    }

    #[test]
    fn zero_first_value_leaves_only_change_undefined() {
        let stats = summarize(&[0.0, 4.0]);
        assert_eq!(stats.percent_change, None);
        assert_eq!(stats.mean, Some(2.0));
        assert_eq!(stats.median, Some(2.0));
    }

    #[test]
    fn summarize_many_preserves_order() {
        let eth = [1.0, 2.0];
        let doge = [3.0, 1.0];
        let out = summarize_many([("ETH", &eth[..]), ("DOGE", &doge[..])]);
        let labels: Vec<_> = out.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["ETH", "DOGE"]);
    }

    #[test]
    fn sort_by_metric_puts_undefined_last() {
        let a = [10.0, 5.0]; // -50%
        let b = [0.0, 5.0]; // undefined
        let c = [10.0, 20.0]; // +100%
        let mut out = summarize_many([("a", &a[..]), ("b", &b[..]), ("c", &c[..])]);

        sort_summaries(&mut out, SummaryMetric::PercentChange, SortOrder::Descending);
        let labels: Vec<_> = out.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["c", "a", "b"]);

        sort_summaries(&mut out, SummaryMetric::PercentChange, SortOrder::Ascending);
        let labels: Vec<_> = out.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["a", "c", "b"]);
    }

    #[test]
    fn metric_names_parse() {
        assert_eq!("std".parse::<SummaryMetric>().unwrap(), SummaryMetric::StdDev);
        assert_eq!("percent-change".parse::<SummaryMetric>().unwrap(), SummaryMetric::PercentChange);
        assert!(matches!("sharpe".parse::<SummaryMetric>(), Err(AnalyticsError::UnknownMetric(_))));
    }
}
