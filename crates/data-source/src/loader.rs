use crate::error::DataError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use core_types::Bar;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;
use tracing::info;

/// Header names accepted for the timestamp column.
const DATE_COLUMNS: [&str; 5] = ["date", "timestamp", "datetime", "time", "open_time"];

/// Unix timestamps at or above this magnitude are taken to be milliseconds.
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Parses the timestamp formats found in exchange exports.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (optionally with a UTC offset),
/// `YYYY-MM-DD`, and Unix seconds or milliseconds. Naive values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    // "1712620800" or pandas-style "1712620800.0"
    let number = s.parse::<f64>().ok().filter(|n| n.is_finite())?;
    let whole = number.trunc() as i64;
    if whole.abs() >= MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(whole)
    } else {
        DateTime::from_timestamp(whole, 0)
    }
}

/// Column positions of the OHLCV fields in one file.
struct Columns {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord, path: &Path) -> Result<Self, DataError> {
        let find = |names: &[&str], column: &'static str| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
                .ok_or_else(|| DataError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                })
        };

        Ok(Self {
            date: find(&DATE_COLUMNS, "date")?,
            open: find(&["open"], "open")?,
            high: find(&["high"], "high")?,
            low: find(&["low"], "low")?,
            close: find(&["close"], "close")?,
            volume: find(&["volume"], "volume")?,
        })
    }

    fn parse(&self, record: &StringRecord) -> Result<Bar, String> {
        let raw_date = record.get(self.date).ok_or("missing date")?;
        let timestamp =
            parse_timestamp(raw_date).ok_or_else(|| format!("could not parse date '{raw_date}'"))?;

        let number = |index: usize, name: &str| -> Result<f64, String> {
            let raw = record.get(index).ok_or_else(|| format!("missing {name}"))?;
            raw.parse::<f64>()
                .map_err(|e| format!("{name} '{raw}': {e}"))
        };

        Ok(Bar::new(
            timestamp,
            number(self.open, "open")?,
            number(self.high, "high")?,
            number(self.low, "low")?,
            number(self.close, "close")?,
            number(self.volume, "volume")?,
        ))
    }
}

/// Loads OHLCV bars from a CSV file with a header row.
///
/// Header names are matched case-insensitively and extra columns are ignored.
/// Every row must form a valid `Bar` and rows must be in strictly ascending
/// timestamp order; the file is rejected otherwise, because the analytics
/// never re-sort their input.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<Bar>, DataError> {
    let path = path.as_ref();
    info!("Loading data from: {}", path.display());

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)?;
    let columns = Columns::from_headers(reader.headers()?, path)?;

    let mut bars: Vec<Bar> = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        // Row numbers are 1-based and count the header line.
        let row = index + 2;

        let invalid = |reason: String| DataError::InvalidRow {
            path: path.to_path_buf(),
            row,
            reason,
        };
        let bar = columns.parse(&record).map_err(invalid)?;
        if !bar.validate() {
            return Err(invalid(format!("values out of range: {bar:?}")));
        }

        if let Some(previous) = bars.last() {
            if bar.timestamp <= previous.timestamp {
                return Err(DataError::Unordered {
                    path: path.to_path_buf(),
                    row,
                    previous: previous.timestamp,
                    current: bar.timestamp,
                });
            }
        }
        bars.push(bar);
    }

    let (Some(first), Some(last)) = (bars.first(), bars.last()) else {
        return Err(DataError::Empty(path.to_path_buf()));
    };
    info!(
        "Loaded {} bars from {} to {}",
        bars.len(),
        first.timestamp,
        last.timestamp
    );

    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(lines: &[&str]) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file
    }

    #[test]
    fn parses_supported_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 4, 9, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2025-04-09 00:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-04-09T00:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-04-09T02:00:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-04-09 00:00:00+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-04-09"), Some(expected));
        assert_eq!(parse_timestamp("1744156800"), Some(expected));
        assert_eq!(parse_timestamp("1744156800000"), Some(expected));
        assert_eq!(parse_timestamp("1744156800.0"), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn loads_bars_with_mixed_case_headers_and_extra_columns() {
        let file = write_csv(&[
            "Date,Open,High,Low,Close,Volume,trades",
            "2025-04-08 00:00:00,100,105,98,102,1000,12",
            "2025-04-08 01:00:00,102,108,101,107,1200,15",
        ]);
        let bars = load_csv(file.path()).unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 102.0);
        assert_eq!(bars[1].volume, 1200.0);
        assert_eq!(
            bars[1].timestamp,
            Utc.with_ymd_and_hms(2025, 4, 8, 1, 0, 0).unwrap()
        );
    }

    #[test]
    fn rejects_unordered_rows() {
        let file = write_csv(&[
            "date,open,high,low,close,volume",
            "2025-04-08,1,1,1,1,1",
            "2025-04-10,1,1,1,1,1",
            "2025-04-09,1,1,1,1,1",
        ]);
        match load_csv(file.path()) {
            Err(DataError::Unordered { row, .. }) => assert_eq!(row, 4),
            other => panic!("expected Unordered, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_timestamps() {
        let file = write_csv(&[
            "date,open,high,low,close,volume",
            "2025-04-08,1,1,1,1,1",
            "2025-04-08,1,1,1,1,1",
        ]);
        assert!(matches!(load_csv(file.path()), Err(DataError::Unordered { .. })));
    }

    #[test]
    fn rejects_missing_column() {
        let file = write_csv(&["date,open,high,low,close", "2025-04-08,1,1,1,1"]);
        match load_csv(file.path()) {
            Err(DataError::MissingColumn { column, .. }) => assert_eq!(column, "volume"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_values() {
        let file = write_csv(&[
            "date,open,high,low,close,volume",
            "2025-04-08,1,1,1,abc,1",
        ]);
        assert!(matches!(load_csv(file.path()), Err(DataError::InvalidRow { row: 2, .. })));

        let negative = write_csv(&[
            "date,open,high,low,close,volume",
            "2025-04-08,1,1,1,1,-5",
        ]);
        assert!(matches!(load_csv(negative.path()), Err(DataError::InvalidRow { .. })));
    }

    #[test]
    fn rejects_empty_file() {
        let file = write_csv(&["date,open,high,low,close,volume"]);
        assert!(matches!(load_csv(file.path()), Err(DataError::Empty(_))));
    }
}
