use thiserror::Error;

/// Failures of the selection surface of this crate.
///
/// Numeric operations never fail: indeterminate results are reported as `None`
/// values inside the returned series and reports.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Unknown indicator '{0}': expected one of sma, ema, bollinger")]
    UnknownIndicator(String),

    #[error("Unknown metric '{0}'")]
    UnknownMetric(String),
}
