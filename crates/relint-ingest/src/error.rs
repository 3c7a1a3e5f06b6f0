//! Error types for submission ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating or reading submission files.
///
/// Every variant is fatal to the run: a file the plan requires is missing or
/// unreadable, which is an environment problem, not a user-data error.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Submission directory not found or not readable.
    #[error("submission directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Data file expected by the plan could not be opened.
    #[error("failed to open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Data file ended before a header line.
    #[error("file has no header line: {path}")]
    MissingHeader { path: PathBuf },

    /// A line could not be read or split.
    #[error("failed to read record from {path}: {source}")]
    RecordRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
