use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Unrecognised data file name '{0}': expected COIN_TIMEFRAME[_START_to_END].csv")]
    InvalidFileName(String),
}
