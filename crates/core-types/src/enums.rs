use crate::error::CoreError;
use crate::structs::Bar;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A numeric column of a `Bar` that can be extracted into a plain series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl Field {
    /// Reads this field from a single bar.
    pub fn value(&self, bar: &Bar) -> f64 {
        match self {
            Field::Open => bar.open,
            Field::High => bar.high,
            Field::Low => bar.low,
            Field::Close => bar.close,
            Field::Volume => bar.volume,
        }
    }

    /// Extracts this field from every bar, preserving chronological order.
    pub fn extract(&self, bars: &[Bar]) -> Vec<f64> {
        bars.iter().map(|bar| self.value(bar)).collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Open => "open",
            Field::High => "high",
            Field::Low => "low",
            Field::Close => "close",
            Field::Volume => "volume",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Field::Open),
            "high" => Ok(Field::High),
            "low" => Ok(Field::Low),
            "close" => Ok(Field::Close),
            "volume" => Ok(Field::Volume),
            other => Err(CoreError::InvalidInput(
                "field".to_string(),
                format!("'{other}' is not one of open, high, low, close, volume"),
            )),
        }
    }
}
