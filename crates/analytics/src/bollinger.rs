use crate::moving_average::has_history;
use crate::stats::{finite, mean, population_std_dev};
use core_types::IndicatorSeries;
use serde::{Deserialize, Serialize};

/// Width of the bands in standard deviations.
pub const BOLLINGER_MULTIPLIER: f64 = 2.0;

/// Three index-aligned band series sharing the same undefined prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: IndicatorSeries,
    pub middle: IndicatorSeries,
    pub lower: IndicatorSeries,
}

impl BollingerBands {
    fn undefined(len: usize) -> Self {
        Self {
            upper: vec![None; len],
            middle: vec![None; len],
            lower: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.middle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middle.is_empty()
    }
}

/// Bollinger Bands with the standard `2.0` multiplier.
pub fn compute_bollinger(series: &[f64], period: usize) -> BollingerBands {
    compute_bollinger_with(series, period, BOLLINGER_MULTIPLIER)
}

/// Bollinger Bands around an SMA middle band.
///
/// Sigma is the population standard deviation of the same trailing window the
/// middle band averages over.
pub fn compute_bollinger_with(series: &[f64], period: usize, multiplier: f64) -> BollingerBands {
    if !has_history(series, period, "Bollinger") {
        return BollingerBands::undefined(series.len());
    }

    let mut bands = BollingerBands {
        upper: Vec::with_capacity(series.len()),
        middle: Vec::with_capacity(series.len()),
        lower: Vec::with_capacity(series.len()),
    };
    bands.upper.resize(period - 1, None);
    bands.middle.resize(period - 1, None);
    bands.lower.resize(period - 1, None);

    for window in series.windows(period) {
        let middle = mean(window);
        let sigma = population_std_dev(window);
        let (upper, lower) = match (middle, sigma) {
            (Some(m), Some(s)) => (finite(m + multiplier * s), finite(m - multiplier * s)),
            _ => (None, None),
        };
        bands.upper.push(upper);
        bands.middle.push(middle);
        bands.lower.push(lower);
    }
    bands
}
