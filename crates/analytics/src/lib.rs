//! # Coinscope Analytics Engine
//!
//! This crate holds the time-series analytics behind the Coinscope dashboard:
//! moving averages, Bollinger Bands, return and risk statistics, cross-file
//! summary statistics and event impact comparisons.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   networks or rendering. It depends only on `core-types` (Layer 0).
//! - **Pure Functions:** Every computation is a free function from an immutable
//!   slice to a freshly allocated result. Nothing is shared between calls.
//! - **Undefined, not failed:** Insufficient history, zero denominators and empty
//!   input produce `None` in the affected position or statistic. One undefined
//!   value never invalidates its siblings.
//!
//! ## Public API
//!
//! - `compute_sma`, `compute_ema`, `compute_bollinger`: windowed indicators.
//! - `compute_returns`, `compute_drawdown` and the risk ratios.
//! - `summarize`, `compute_impact`: scalar aggregates.
//! - `AnalyticsEngine`: a parameterised facade over the functions above.
//! - `AnalyticsError`: the errors of the name-parsing surface.

// Declare the modules that constitute this crate.
pub mod bollinger;
pub mod engine;
pub mod error;
pub mod impact;
pub mod indicator;
pub mod metrics;
pub mod moving_average;
pub mod report;
pub mod risk;
pub mod stats;
pub mod summary;

// Re-export the key components to create a clean, public-facing API.
pub use bollinger::{BOLLINGER_MULTIPLIER, BollingerBands, compute_bollinger, compute_bollinger_with};
pub use engine::{AnalyticsEngine, DEFAULT_PERIOD};
pub use error::AnalyticsError;
pub use impact::{
    ImpactRanking, ImpactStats, LabeledImpact, compute_impact, compute_impact_between, rank_impacts,
};
pub use indicator::{IndicatorKind, IndicatorOutput, compute_indicator};
pub use metrics::{analyze_series, compute_file_metrics, sharpe_ratio};
pub use moving_average::{compute_ema, compute_sma};
pub use report::{FileMetrics, SeriesAnalysis, SharpeParams};
pub use risk::{
    DAYS_PER_YEAR, annualized_return, average_return, compute_drawdown, compute_returns,
    return_volatility, risk_reward_ratio,
};
pub use stats::SortOrder;
pub use summary::{
    LabeledSummary, SummaryMetric, SummaryStats, sort_summaries, summarize, summarize_many,
};
