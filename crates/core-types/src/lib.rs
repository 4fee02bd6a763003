pub mod enums;
pub mod error;
pub mod file_name;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::Field;
pub use error::CoreError;
pub use file_name::DataFileName;
pub use structs::{Bar, IndicatorSeries};
