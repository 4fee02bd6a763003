//! # Coinscope Data Source Crate
//!
//! This crate reads the OHLCV CSV exports the dashboard analyses. It is the
//! only part of the system that touches the file system.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Adapter:** Encapsulates file-format details (header aliases,
//!   timestamp formats, file naming) and hands out plain `Bar` slices.
//! - **Read-only:** Nothing is ever written back.
//! - **Ordered output:** Loaded bars are guaranteed to be strictly ascending in
//!   time, which the analytics rely on.
//!
//! ## Public API
//!
//! - `DataDirectory`: lists, describes, resolves and loads the files of a data directory.
//! - `load_csv`: loads a single file from any path.
//! - `parse_timestamp`: the timestamp parser shared by both.
//! - `DataError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod directory;
pub mod error;
pub mod loader;

// Re-export the key components to create a clean, public-facing API.
pub use directory::{DataDirectory, FileDetails};
pub use error::DataError;
pub use loader::{load_csv, parse_timestamp};
