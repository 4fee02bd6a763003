use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Metadata encoded in a data file's name.
///
/// Files follow the `COIN_TIMEFRAME_START_to_END[_SUFFIX].csv` convention, e.g.
/// `ETH_1h_2025-03-08_to_2025-04-08_pre_tariff.csv`. Only the coin and timeframe
/// are mandatory; a malformed date range is kept as `None` rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFileName {
    pub file_name: String,
    pub coin: String,
    pub timeframe: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Free-form trailing tag such as `pre_tariff`.
    pub suffix: Option<String>,
}

impl DataFileName {
    pub fn parse(file_name: &str) -> Result<Self, CoreError> {
        let stem = file_name
            .strip_suffix(".csv")
            .ok_or_else(|| CoreError::InvalidFileName(file_name.to_string()))?;

        let parts: Vec<&str> = stem.split('_').collect();
        let (coin, timeframe) = match parts.as_slice() {
            [coin, timeframe, ..] if !coin.is_empty() && !timeframe.is_empty() => {
                (coin.to_string(), timeframe.to_string())
            }
            _ => return Err(CoreError::InvalidFileName(file_name.to_string())),
        };

        let (start, end, suffix) = if parts.len() >= 5 && parts[3] == "to" {
            let start = NaiveDate::parse_from_str(parts[2], "%Y-%m-%d").ok();
            let end = NaiveDate::parse_from_str(parts[4], "%Y-%m-%d").ok();
            let suffix = (parts.len() > 5).then(|| parts[5..].join("_"));
            (start, end, suffix)
        } else {
            (None, None, None)
        };

        Ok(Self {
            file_name: file_name.to_string(),
            coin,
            timeframe,
            start,
            end,
            suffix,
        })
    }

    /// The file name without its coin prefix, used to label series that are
    /// already grouped by coin.
    pub fn label(&self) -> &str {
        self.file_name
            .split_once('_')
            .map(|(_, rest)| rest)
            .unwrap_or(&self.file_name)
    }

    /// Human readable date range, `"N/A"` when the name carries none.
    pub fn date_range(&self) -> String {
        match (self.start, self.end) {
            (Some(start), Some(end)) => format!("{start} to {end}"),
            _ => "N/A".to_string(),
        }
    }
}

impl FromStr for DataFileName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
