//! Error types for the Pcx clipper
//!
//! The bounds test and the scans are total functions and never produce
//! an error. Errors are confined to ingestion, worker pool setup and
//! misuse of the clip cycle protocol or of unknown registry entries.

use std::fmt;

/// Result type for clipper operations
pub type Result<T> = std::result::Result<T, Error>;

/// Clipper errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Point cloud import failed (unreadable file, malformed record)
    ImportFailed(String),

    /// Operation on an entry that is not registered or already released
    InvalidEntry(String),

    /// A dispatch phase is still outstanding
    CycleInProgress,

    /// A scan task vanished before reporting (worker panicked)
    WorkerLost(String),

    /// Initialization failed (worker pool, system setup)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ImportFailed(msg) => write!(f, "Import failed: {}", msg),
            Error::InvalidEntry(msg) => write!(f, "Invalid entry: {}", msg),
            Error::CycleInProgress => write!(f, "Clip cycle already in progress"),
            Error::WorkerLost(msg) => write!(f, "Worker lost: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
