use crate::bollinger::{BollingerBands, compute_bollinger};
use crate::error::AnalyticsError;
use crate::moving_average::{compute_ema, compute_sma};
use core_types::IndicatorSeries;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The overlay indicators a chart can request by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    Sma,
    Ema,
    Bollinger,
}

impl IndicatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorKind::Sma => "sma",
            IndicatorKind::Ema => "ema",
            IndicatorKind::Bollinger => "bollinger",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorKind {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sma" => Ok(IndicatorKind::Sma),
            "ema" => Ok(IndicatorKind::Ema),
            "bollinger" | "bb" => Ok(IndicatorKind::Bollinger),
            _ => Err(AnalyticsError::UnknownIndicator(s.to_string())),
        }
    }
}

/// Result of an indicator: a single line, or a set of bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IndicatorOutput {
    Line { values: IndicatorSeries },
    Bands(BollingerBands),
}

impl IndicatorOutput {
    pub fn len(&self) -> usize {
        match self {
            IndicatorOutput::Line { values } => values.len(),
            IndicatorOutput::Bands(bands) => bands.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Computes the indicator identified by `kind`.
// A complete match: adding an `IndicatorKind` without handling it here is a
// compile error.
pub fn compute_indicator(kind: IndicatorKind, series: &[f64], period: usize) -> IndicatorOutput {
    match kind {
        IndicatorKind::Sma => IndicatorOutput::Line {
            values: compute_sma(series, period),
        },
        IndicatorKind::Ema => IndicatorOutput::Line {
            values: compute_ema(series, period),
        },
        IndicatorKind::Bollinger => IndicatorOutput::Bands(compute_bollinger(series, period)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_by_kind() {
        let series = [1.0, 2.0, 3.0, 4.0, 5.0];
        let sma = compute_indicator(IndicatorKind::Sma, &series, 3);
        assert_eq!(
            sma,
            IndicatorOutput::Line {
                values: vec![None, None, Some(2.0), Some(3.0), Some(4.0)]
            }
        );

        match compute_indicator(IndicatorKind::Bollinger, &series, 3) {
            IndicatorOutput::Bands(bands) => assert_eq!(bands.middle[4], Some(4.0)),
            other => panic!("expected bands, got {other:?}"),
        }
        assert_eq!(compute_indicator(IndicatorKind::Ema, &series, 3).len(), 5);
    }

    #[test]
    fn parses_names() {
        assert_eq!("SMA".parse::<IndicatorKind>().unwrap(), IndicatorKind::Sma);
        assert_eq!("bb".parse::<IndicatorKind>().unwrap(), IndicatorKind::Bollinger);
        assert_eq!(
            "rsi".parse::<IndicatorKind>(),
            Err(AnalyticsError::UnknownIndicator("rsi".to_string()))
        );
    }

    #[test]
    fn output_serializes_with_type_tag() {
        let out = compute_indicator(IndicatorKind::Sma, &[1.0, 3.0], 2);
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["type"], "line");
        assert_eq!(json["values"], serde_json::json!([null, 2.0]));
    }
}
