use thiserror::Error;

use crate::file_type::{FileType, Phase};

/// Contract violations between the schema registry and the data or run plan.
///
/// These are never user-data errors: hitting one means the descriptor table,
/// the load order, or the submission disagree structurally, and the run must
/// abort rather than absorb it into the error report.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error(
        "{file_type} row at line {line_number} has {actual} column(s), expected at least {expected}"
    )]
    RowTooNarrow {
        file_type: FileType,
        line_number: u64,
        expected: usize,
        actual: usize,
    },
    #[error("{file_type} header has {actual} column(s), expected at least {expected}")]
    HeaderTooNarrow {
        file_type: FileType,
        expected: usize,
        actual: usize,
    },
    #[error("no {phase:?} digest was built for {file_type} before it was looked up")]
    MissingDigest { file_type: FileType, phase: Phase },
}

pub type Result<T> = std::result::Result<T, ModelError>;
