use crate::stats::{SortOrder, compare_optional, mean, percent_change};
use chrono::{DateTime, Utc};
use core_types::{Bar, Field};
use serde::{Deserialize, Serialize};

/// Before/after comparison of average price and volume around an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactStats {
    pub pre_count: usize,
    pub post_count: usize,
    pub pre_avg_price: Option<f64>,
    pub post_avg_price: Option<f64>,
    pub price_change_pct: Option<f64>,
    pub pre_avg_volume: Option<f64>,
    pub post_avg_volume: Option<f64>,
    pub volume_change_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledImpact {
    pub label: String,
    pub stats: ImpactStats,
}

/// How an impact table is ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImpactRanking {
    /// Hardest-hit prices first.
    #[default]
    PriceChangeAscending,
    /// Largest volume increase first.
    VolumeChangeDescending,
}

/// Splits `bars` at `split_at` and compares the two sides.
///
/// Bars strictly before `split_at` form the "pre" side, the rest the "post"
/// side. Relies on `bars` being in ascending timestamp order. If either side is
/// empty its averages and both change percentages are undefined.
pub fn compute_impact(bars: &[Bar], split_at: DateTime<Utc>) -> ImpactStats {
    let split = bars.partition_point(|bar| bar.timestamp < split_at);
    let (pre, post) = bars.split_at(split);
    compute_impact_between(pre, post)
}

/// Compares two already partitioned series, e.g. a pre-event and a
/// post-event data file.
pub fn compute_impact_between(pre: &[Bar], post: &[Bar]) -> ImpactStats {
    let pre_avg_price = mean(&Field::Close.extract(pre));
    let post_avg_price = mean(&Field::Close.extract(post));
    let pre_avg_volume = mean(&Field::Volume.extract(pre));
    let post_avg_volume = mean(&Field::Volume.extract(post));

    if pre.is_empty() || post.is_empty() {
        tracing::debug!(
            "Impact: empty partition (pre {}, post {})",
            pre.len(),
            post.len()
        );
    }

    ImpactStats {
        pre_count: pre.len(),
        post_count: post.len(),
        pre_avg_price,
        post_avg_price,
        price_change_pct: change(pre_avg_price, post_avg_price),
        pre_avg_volume,
        post_avg_volume,
        volume_change_pct: change(pre_avg_volume, post_avg_volume),
    }
}

fn change(before: Option<f64>, after: Option<f64>) -> Option<f64> {
    percent_change(before?, after?)
}

pub fn rank_impacts(impacts: &mut [LabeledImpact], ranking: ImpactRanking) {
    match ranking {
        ImpactRanking::PriceChangeAscending => impacts.sort_by(|a, b| {
            compare_optional(a.stats.price_change_pct, b.stats.price_change_pct, SortOrder::Ascending)
        }),
        ImpactRanking::VolumeChangeDescending => impacts.sort_by(|a, b| {
            compare_optional(a.stats.volume_change_pct, b.stats.volume_change_pct, SortOrder::Descending)
        }),
    }
}
