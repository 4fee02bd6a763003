use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty or missing `coinscope.toml` yields a
/// working configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub indicators: IndicatorSettings,
    pub metrics: MetricsSettings,
    pub impact: ImpactSettings,
    pub logging: LoggingSettings,
}

/// Where the OHLCV CSV files live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub directory: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data"),
        }
    }
}

/// Defaults for the custom chart panel.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    /// Window length used when a command does not pass `--period`.
    pub default_period: usize,
    /// Indicator name used when a command does not pass `--kind`.
    pub default_kind: String,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            default_period: 20,
            default_kind: "sma".to_string(),
        }
    }
}

/// Parameters of the simplified Sharpe ratio on the overview page.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    /// Annual risk-free rate as a fraction (0.03 is 3%).
    pub risk_free_rate: f64,
    pub periods_per_year: f64,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.03,
            periods_per_year: 252.0,
        }
    }
}

/// The event whose price and volume impact is analysed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImpactSettings {
    /// Bars at or after this instant count as "post" event.
    pub split_at: DateTime<Utc>,
    /// Coins compared when no files are given explicitly.
    pub coins: Vec<String>,
    /// File name suffix of the pre-event data files (e.g. `pre_tariff`).
    pub pre_suffix: String,
    pub post_suffix: String,
}

impl Default for ImpactSettings {
    fn default() -> Self {
        Self {
            // 2025-04-09T00:00:00Z, the first day covered by the post-tariff data files.
            split_at: DateTime::from_timestamp(1_744_156_800, 0).unwrap_or_default(),
            coins: ["ETH", "LINK", "DOGE", "ARB"].map(String::from).to_vec(),
            pre_suffix: "pre_tariff".to_string(),
            post_suffix: "post_tariff".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    pub format: LogFormat,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
            directory: None,
        }
    }
}
