use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One period of OHLCV market data.
///
/// Bars are produced by a data source and never mutated afterwards. A slice of
/// bars is expected to be in strictly ascending `timestamp` order; none of the
/// analytics operations re-sort their input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Checks the invariants a well-formed bar must satisfy: every value finite,
    /// positive prices, non-negative volume and `high >= low`.
    pub fn validate(&self) -> bool {
        let prices = [self.open, self.high, self.low, self.close];
        prices.iter().all(|p| p.is_finite() && *p > 0.0)
            && self.volume.is_finite()
            && self.volume >= 0.0
            && self.high >= self.low
    }
}

/// Output of a windowed computation, index-aligned with its source series.
///
/// `None` is the single "undefined" marker: either not enough history exists at
/// that position, or the value is indeterminate (division by zero, NaN input).
pub type IndicatorSeries = Vec<Option<f64>>;
