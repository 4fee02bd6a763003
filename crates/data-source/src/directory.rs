use crate::error::DataError;
use crate::loader::load_csv;
use core_types::{Bar, DataFileName};
use csv::ReaderBuilder;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A data file's name metadata together with what its contents look like.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileDetails {
    #[serde(flatten)]
    pub name: DataFileName,
    pub columns: Vec<String>,
    /// Data rows, excluding the header.
    pub num_rows: usize,
    pub size_kb: f64,
}

/// A directory of `COIN_TIMEFRAME_...csv` exports.
///
/// The directory is only ever read; files are resolved by bare name so a
/// request can never escape it.
#[derive(Debug, Clone)]
pub struct DataDirectory {
    root: PathBuf,
}

impl DataDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists every recognised data file, sorted by file name.
    ///
    /// Files that do not follow the naming convention are skipped with a warning.
    pub fn files(&self) -> Result<Vec<DataFileName>, DataError> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.ends_with(".csv") {
                debug!("Ignoring non-CSV file {}", name);
                continue;
            }
            match DataFileName::parse(&name) {
                Ok(parsed) => files.push(parsed),
                Err(e) => warn!("Skipping {}: {}", name, e),
            }
        }
        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(files)
    }

    /// Groups the available files by coin.
    pub fn available_files(&self) -> Result<BTreeMap<String, Vec<DataFileName>>, DataError> {
        let mut by_coin: BTreeMap<String, Vec<DataFileName>> = BTreeMap::new();
        for file in self.files()? {
            by_coin.entry(file.coin.clone()).or_default().push(file);
        }
        Ok(by_coin)
    }

    /// Finds the first file of `coin` whose name carries `suffix`
    /// (e.g. `pre_tariff`).
    pub fn find(&self, coin: &str, suffix: &str) -> Result<Option<DataFileName>, DataError> {
        Ok(self
            .files()?
            .into_iter()
            .find(|f| f.coin.eq_ignore_ascii_case(coin) && f.suffix.as_deref() == Some(suffix)))
    }

    /// Maps a bare file name to its path inside the directory.
    pub fn resolve(&self, file_name: &str) -> Result<PathBuf, DataError> {
        let is_bare = !file_name.is_empty()
            && file_name != "."
            && file_name != ".."
            && !file_name.contains(['/', '\\']);
        if !is_bare {
            return Err(DataError::InvalidPath(file_name.to_string()));
        }

        let path = self.root.join(file_name);
        if !path.is_file() {
            return Err(DataError::NotFound(file_name.to_string()));
        }
        Ok(path)
    }

    pub fn load(&self, file_name: &str) -> Result<Vec<Bar>, DataError> {
        load_csv(self.resolve(file_name)?)
    }

    /// Reads the header, row count and size of one file without parsing its bars.
    pub fn describe(&self, file: &DataFileName) -> Result<FileDetails, DataError> {
        let path = self.resolve(&file.file_name)?;
        let size_kb = std::fs::metadata(&path)?.len() as f64 / 1024.0;

        let mut reader = ReaderBuilder::new().flexible(true).from_path(&path)?;
        let columns = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
        let mut num_rows = 0;
        for record in reader.byte_records() {
            record?;
            num_rows += 1;
        }

        Ok(FileDetails {
            name: file.clone(),
            columns,
            num_rows,
            size_kb,
        })
    }

    /// Describes every available file, grouped by coin.
    ///
    /// Files that cannot be read are left out with a warning.
    pub fn describe_all(&self) -> Result<BTreeMap<String, Vec<FileDetails>>, DataError> {
        let mut by_coin: BTreeMap<String, Vec<FileDetails>> = BTreeMap::new();
        for file in self.files()? {
            match self.describe(&file) {
                Ok(details) => by_coin.entry(file.coin).or_default().push(details),
                Err(e) => warn!("Skipping {}: {}", file.file_name, e),
            }
        }
        Ok(by_coin)
    }
}
