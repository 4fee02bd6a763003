use data_source::{DataDirectory, DataError};
use std::fs;
use tempfile::TempDir;

const HEADER: &str = "date,open,high,low,close,volume";

fn data_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let write = |name: &str, rows: &[&str]| {
        let mut contents = String::from(HEADER);
        for row in rows {
            contents.push('\n');
            contents.push_str(row);
        }
        fs::write(dir.path().join(name), contents).unwrap();
    };

    write(
        "ETH_1h_2025-03-08_to_2025-04-08_pre_tariff.csv",
        &["2025-04-07 00:00:00,100,101,99,100,10", "2025-04-08 00:00:00,100,101,99,100,10"],
    );
    write(
        "ETH_1h_2025-04-09_to_2025-04-13_post_tariff.csv",
        &["2025-04-09 00:00:00,80,81,79,80,20"],
    );
    write("DOGE_1d.csv", &["2025-04-09,0.2,0.21,0.19,0.2,1000"]);
    write("notes.csv", &["2025-04-09,1,1,1,1,1"]);
    fs::write(dir.path().join("README.md"), "not data").unwrap();
    fs::create_dir(dir.path().join("archive")).unwrap();
    dir
}

#[test]
fn groups_files_by_coin() {
    let tmp = data_dir();
    let directory = DataDirectory::new(tmp.path());

    let grouped = directory.available_files().unwrap();
    let coins: Vec<_> = grouped.keys().map(String::as_str).collect();
    assert_eq!(coins, ["DOGE", "ETH"]);
    assert_eq!(grouped["ETH"].len(), 2);
    assert_eq!(grouped["DOGE"][0].timeframe, "1d");
}

#[test]
fn finds_event_files_by_suffix() {
    let tmp = data_dir();
    let directory = DataDirectory::new(tmp.path());

    let pre = directory.find("eth", "pre_tariff").unwrap().unwrap();
    assert_eq!(pre.file_name, "ETH_1h_2025-03-08_to_2025-04-08_pre_tariff.csv");
    assert!(directory.find("DOGE", "pre_tariff").unwrap().is_none());
}

#[test]
fn loads_by_bare_name() {
    let tmp = data_dir();
    let directory = DataDirectory::new(tmp.path());

    let bars = directory
        .load("ETH_1h_2025-04-09_to_2025-04-13_post_tariff.csv")
        .unwrap();
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].close, 80.0);
}

#[test]
fn describes_rows_columns_and_size() {
    let tmp = data_dir();
    let directory = DataDirectory::new(tmp.path());

    let pre = directory.find("ETH", "pre_tariff").unwrap().unwrap();
    let details = directory.describe(&pre).unwrap();
    assert_eq!(details.num_rows, 2);
    assert_eq!(details.columns, ["date", "open", "high", "low", "close", "volume"]);
    let bytes = fs::metadata(tmp.path().join(&pre.file_name)).unwrap().len();
    assert_eq!(details.size_kb, bytes as f64 / 1024.0);
    assert_eq!(details.name, pre);
}

#[test]
fn describe_all_groups_and_skips_unreadable_files() {
    let tmp = data_dir();
    // A header that is not UTF-8 cannot be read.
    fs::write(tmp.path().join("LINK_1h.csv"), b"\xff\xfe,close\n1,2\n").unwrap();
    let directory = DataDirectory::new(tmp.path());

    let described = directory.describe_all().unwrap();
    let coins: Vec<_> = described.keys().map(String::as_str).collect();
    assert_eq!(coins, ["DOGE", "ETH"]);
    assert_eq!(described["DOGE"][0].num_rows, 1);
    assert_eq!(described["ETH"].len(), 2);
}

#[test]
fn refuses_paths_and_missing_files() {
    let tmp = data_dir();
    let directory = DataDirectory::new(tmp.path());

    assert!(matches!(directory.load("../etc/passwd"), Err(DataError::InvalidPath(_))));
    assert!(matches!(directory.load(".."), Err(DataError::InvalidPath(_))));
    assert!(matches!(directory.load("BTC_1h.csv"), Err(DataError::NotFound(_))));
}

#[test]
fn missing_directory_is_an_io_error() {
    let directory = DataDirectory::new("/definitely/not/here");
    assert!(matches!(directory.files(), Err(DataError::Io(_))));
}
