use crate::summary::SummaryStats;
use serde::{Deserialize, Serialize};

/// The custom-analysis panel for one extracted field of one file.
///
/// Every ratio is `Option<>`: `None` marks a value that cannot be computed from
/// the data (empty series, zero denominator) and is rendered as "N/A".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesAnalysis {
    pub data_points: usize,

    // I. Price Statistics
    pub summary: SummaryStats,

    // II. Performance Metrics
    pub avg_return: Option<f64>,
    pub return_volatility: Option<f64>,
    /// Fraction of the running peak, `0.0..=1.0` for positive prices.
    pub max_drawdown: f64,
    pub risk_reward: Option<f64>, // Option<> because volatility can be 0
    pub annualized_return: Option<f64>,
}

/// Headline metrics of a data file, as shown on the overview page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetrics {
    pub num_periods: usize,

    // I. Price
    pub avg_price: Option<f64>,
    /// Coefficient of variation of the close price, in percent.
    pub price_volatility_pct: Option<f64>,

    // II. Volume
    pub avg_volume: Option<f64>,
    pub volume_volatility_pct: Option<f64>,

    // III. Risk and Return
    pub max_drawdown_pct: f64,
    pub sharpe_ratio: Option<f64>,
    pub avg_period_return_pct: Option<f64>,
}

/// Parameters of the simplified Sharpe ratio in [`FileMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SharpeParams {
    /// Annual risk-free rate as a fraction (0.03 is 3%).
    pub risk_free_rate: f64,
    /// Number of return periods per year used to annualize mean and volatility.
    pub periods_per_year: f64,
}

impl Default for SharpeParams {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.03,
            periods_per_year: 252.0,
        }
    }
}
