use crate::report::{FileMetrics, SeriesAnalysis, SharpeParams};
use crate::risk::{
    annualized_return, average_return, compute_drawdown, compute_returns, return_volatility,
    risk_reward_ratio,
};
use crate::stats::{all_defined, finite, mean, population_std_dev, ratio};
use crate::summary::summarize;
use core_types::{Bar, Field};

/// Runs the full return and risk analysis over one series.
pub fn analyze_series(series: &[f64]) -> SeriesAnalysis {
    let returns = compute_returns(series);
    let avg_return = average_return(&returns);
    let return_volatility = return_volatility(&returns);

    SeriesAnalysis {
        data_points: series.len(),
        summary: summarize(series),
        avg_return,
        return_volatility,
        max_drawdown: compute_drawdown(series),
        risk_reward: risk_reward_ratio(avg_return, return_volatility),
        annualized_return: annualized_return(avg_return),
    }
}

/// Computes the overview metrics of a file from its close prices and volumes.
pub fn compute_file_metrics(bars: &[Bar], params: &SharpeParams) -> FileMetrics {
    let closes = Field::Close.extract(bars);
    let volumes = Field::Volume.extract(bars);

    let avg_period_return_pct = if closes.len() < 2 {
        Some(0.0)
    } else {
        average_return(&compute_returns(&closes)).map(|r| r * 100.0)
    };

    FileMetrics {
        num_periods: bars.len(),
        avg_price: mean(&closes),
        price_volatility_pct: coefficient_of_variation(&closes),
        avg_volume: mean(&volumes),
        volume_volatility_pct: coefficient_of_variation(&volumes),
        max_drawdown_pct: compute_drawdown(&closes) * 100.0,
        sharpe_ratio: sharpe_ratio(&closes, params),
        avg_period_return_pct,
    }
}

/// Standard deviation relative to the mean, in percent.
fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    ratio(population_std_dev(values)?, mean(values)?).map(|cv| cv * 100.0)
}

/// Annualized excess return over annualized volatility.
///
/// Reported as `0.0` when there are fewer than two prices or the returns have
/// no dispersion; undefined when a return cannot be computed.
pub fn sharpe_ratio(prices: &[f64], params: &SharpeParams) -> Option<f64> {
    if prices.len() < 2 {
        return Some(0.0);
    }

    let returns = all_defined(&compute_returns(prices))?;
    let annual_return = mean(&returns)? * params.periods_per_year;
    let annual_volatility = population_std_dev(&returns)? * params.periods_per_year.sqrt();

    if annual_volatility == 0.0 {
        return Some(0.0);
    }
    finite((annual_return - params.risk_free_rate) / annual_volatility)
}
