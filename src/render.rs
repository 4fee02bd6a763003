//! Terminal tables and JSON payloads for the CLI.

use analytics::{
    FileMetrics, IndicatorKind, IndicatorOutput, LabeledImpact, LabeledSummary, SeriesAnalysis,
};
use chrono::{DateTime, Utc};
use comfy_table::{Cell, CellAlignment, Table};
use core_types::{Bar, Field};
use data_source::FileDetails;
use serde::Serialize;
use std::collections::BTreeMap;

const NOT_AVAILABLE: &str = "N/A";

/// JSON body of the `indicator` command.
#[derive(Serialize)]
pub struct IndicatorReport<'a> {
    pub file: &'a str,
    pub kind: IndicatorKind,
    pub period: usize,
    pub field: Field,
    pub timestamps: Vec<DateTime<Utc>>,
    pub output: &'a IndicatorOutput,
}

fn num(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}%"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Fractions (returns, drawdowns) rendered as percentages.
fn fraction_pct(value: Option<f64>) -> String {
    pct(value.map(|v| v * 100.0))
}

fn right(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn key_value_table(rows: Vec<(&str, String)>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), right(value)]);
    }
    table
}

pub fn files_table(files: &BTreeMap<String, Vec<FileDetails>>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Coin", "File", "Timeframe", "Date range", "Tag", "Rows", "Size (KB)",
    ]);
    for (coin, entries) in files {
        for details in entries {
            let file = &details.name;
            table.add_row(vec![
                Cell::new(coin),
                Cell::new(file.label()),
                Cell::new(&file.timeframe),
                Cell::new(file.date_range()),
                Cell::new(file.suffix.as_deref().unwrap_or_default()),
                right(details.num_rows.to_string()),
                right(format!("{:.2}", details.size_kb)),
            ]);
        }
    }
    table
}

pub fn indicator_table(bars: &[Bar], field: Field, output: &IndicatorOutput) -> Table {
    let mut table = Table::new();
    match output {
        IndicatorOutput::Line { values } => {
            table.set_header(vec!["Timestamp", field.as_str(), "Value"]);
            for (bar, value) in bars.iter().zip(values) {
                table.add_row(vec![
                    Cell::new(bar.timestamp),
                    right(num(Some(field.value(bar)), 4)),
                    right(num(*value, 4)),
                ]);
            }
        }
        IndicatorOutput::Bands(bands) => {
            table.set_header(vec!["Timestamp", field.as_str(), "Upper", "Middle", "Lower"]);
            for (i, bar) in bars.iter().enumerate().take(bands.len()) {
                table.add_row(vec![
                    Cell::new(bar.timestamp),
                    right(num(Some(field.value(bar)), 4)),
                    right(num(bands.upper[i], 4)),
                    right(num(bands.middle[i], 4)),
                    right(num(bands.lower[i], 4)),
                ]);
            }
        }
    }
    table
}

pub fn analysis_table(analysis: &SeriesAnalysis) -> Table {
    let s = &analysis.summary;
    key_value_table(vec![
        ("Data points", analysis.data_points.to_string()),
        ("First", num(s.first, 4)),
        ("Last", num(s.last, 4)),
        ("Min", num(s.min, 4)),
        ("Max", num(s.max, 4)),
        ("Mean", num(s.mean, 4)),
        ("Median", num(s.median, 4)),
        ("Std dev", num(s.std_dev, 4)),
        ("Change", pct(s.percent_change)),
        ("Avg return", fraction_pct(analysis.avg_return)),
        ("Return volatility", fraction_pct(analysis.return_volatility)),
        ("Max drawdown", fraction_pct(Some(analysis.max_drawdown))),
        ("Risk/reward", num(analysis.risk_reward, 4)),
        ("Annualized return", fraction_pct(analysis.annualized_return)),
    ])
}

pub fn comparison_table(summaries: &[LabeledSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "File", "Count", "Min", "Max", "Mean", "Median", "Std dev", "Change",
    ]);
    for summary in summaries {
        let s = &summary.stats;
        table.add_row(vec![
            Cell::new(&summary.label),
            right(s.count.to_string()),
            right(num(s.min, 4)),
            right(num(s.max, 4)),
            right(num(s.mean, 4)),
            right(num(s.median, 4)),
            right(num(s.std_dev, 4)),
            right(pct(s.percent_change)),
        ]);
    }
    table
}

pub fn impact_table(impacts: &[LabeledImpact]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Coin",
        "Pre bars",
        "Post bars",
        "Pre avg price",
        "Post avg price",
        "Price change",
        "Pre avg volume",
        "Post avg volume",
        "Volume change",
    ]);
    for impact in impacts {
        let s = &impact.stats;
        table.add_row(vec![
            Cell::new(&impact.label),
            right(s.pre_count.to_string()),
            right(s.post_count.to_string()),
            right(num(s.pre_avg_price, 4)),
            right(num(s.post_avg_price, 4)),
            right(pct(s.price_change_pct)),
            right(num(s.pre_avg_volume, 2)),
            right(num(s.post_avg_volume, 2)),
            right(pct(s.volume_change_pct)),
        ]);
    }
    table
}

pub fn metrics_table(metrics: &FileMetrics) -> Table {
    key_value_table(vec![
        ("Periods", metrics.num_periods.to_string()),
        ("Avg price", num(metrics.avg_price, 4)),
        ("Price volatility", pct(metrics.price_volatility_pct)),
        ("Avg volume", num(metrics.avg_volume, 2)),
        ("Volume volatility", pct(metrics.volume_volatility_pct)),
        ("Max drawdown", pct(Some(metrics.max_drawdown_pct))),
        ("Sharpe ratio", num(metrics.sharpe_ratio, 3)),
        ("Avg period return", pct(metrics.avg_period_return_pct)),
    ])
}
