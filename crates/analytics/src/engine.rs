use crate::impact::{ImpactStats, LabeledImpact, compute_impact, compute_impact_between};
use crate::indicator::{IndicatorKind, IndicatorOutput, compute_indicator};
use crate::metrics::{analyze_series, compute_file_metrics};
use crate::report::{FileMetrics, SeriesAnalysis, SharpeParams};
use crate::summary::{LabeledSummary, summarize_many};
use chrono::{DateTime, Utc};
use core_types::{Bar, Field};

/// Period used for indicators when the caller does not pick one.
pub const DEFAULT_PERIOD: usize = 20;

/// A stateless calculator that runs the analyses of the dashboard over bars.
///
/// The engine only carries parameters; every call reads its arguments and
/// returns fresh results, so one instance can serve any number of requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticsEngine {
    default_period: usize,
    sharpe: SharpeParams,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self {
            default_period: DEFAULT_PERIOD,
            sharpe: SharpeParams::default(),
        }
    }
}

impl AnalyticsEngine {
    pub fn new(default_period: usize, sharpe: SharpeParams) -> Self {
        Self {
            default_period,
            sharpe,
        }
    }

    pub fn default_period(&self) -> usize {
        self.default_period
    }

    /// Computes an indicator over one field of `bars`.
    ///
    /// # Arguments
    ///
    /// * `kind` - Which indicator to compute.
    /// * `bars` - The chronologically ordered source data.
    /// * `field` - The column to extract (usually `Field::Close`).
    /// * `period` - Window length; falls back to the engine's default period.
    pub fn indicator(
        &self,
        kind: IndicatorKind,
        bars: &[Bar],
        field: Field,
        period: Option<usize>,
    ) -> IndicatorOutput {
        let period = period.unwrap_or(self.default_period);
        tracing::debug!(
            "Computing {} over {} {} values with period {}",
            kind,
            bars.len(),
            field,
            period
        );
        compute_indicator(kind, &field.extract(bars), period)
    }

    pub fn analyze(&self, bars: &[Bar], field: Field) -> SeriesAnalysis {
        analyze_series(&field.extract(bars))
    }

    pub fn file_metrics(&self, bars: &[Bar]) -> FileMetrics {
        compute_file_metrics(bars, &self.sharpe)
    }

    /// Summarizes `field` for several labelled files, preserving input order.
    pub fn compare<'a, I>(&self, inputs: I, field: Field) -> Vec<LabeledSummary>
    where
        I: IntoIterator<Item = (&'a str, &'a [Bar])>,
    {
        let extracted: Vec<(&str, Vec<f64>)> = inputs
            .into_iter()
            .map(|(label, bars)| (label, field.extract(bars)))
            .collect();
        summarize_many(
            extracted
                .iter()
                .map(|(label, series)| (*label, series.as_slice())),
        )
    }

    pub fn impact(&self, label: &str, bars: &[Bar], split_at: DateTime<Utc>) -> LabeledImpact {
        LabeledImpact {
            label: label.to_string(),
            stats: compute_impact(bars, split_at),
        }
    }

    pub fn impact_between(&self, pre: &[Bar], post: &[Bar]) -> ImpactStats {
        compute_impact_between(pre, post)
    }
}
