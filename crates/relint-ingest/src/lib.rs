#![deny(unsafe_code)]

//! I/O plumbing for the key validator: submission directory layout,
//! tab-separated record scanning, and deletion-list parsing.
//!
//! Files are tab-separated with a header line; key extraction is positional,
//! so only physical line numbers and raw field values are surfaced here.
//! Field-level well-formedness is guaranteed by an upstream validation pass
//! and is not re-checked.

mod deletion;
mod error;
mod layout;
mod tsv;

pub use deletion::{DeletionEntry, DeletionList, DeletionScope, parse_deletion_file};
pub use error::{IngestError, Result};
pub use layout::SubmissionLayout;
pub use tsv::{TsvRecord, TsvSource, read_id_column};
