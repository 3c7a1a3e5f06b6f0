#![deny(unsafe_code)]

//! The key/referential-integrity validation engine.
//!
//! Given a baseline ("original") data set and an incremental ("new") one,
//! the engine checks primary-key uniqueness, foreign-key resolution,
//! secondary-foreign-key resolution, and surjectivity (every parent record
//! referenced by at least one child) across all submission file types, and
//! produces a complete error report in a single pass over each file.
//!
//! User-data problems are collected, never thrown; only environment problems
//! (missing required input) and schema-contract violations abort a run.

mod collector;
mod digest;
mod overlay;
mod report_writer;
mod scanner;
mod surjection;
mod validator;

pub use collector::ErrorCollector;
pub use digest::{DigestRegistry, EncounteredKeys, FileDigest};
pub use overlay::{DeletionOverlay, validate_deletions};
pub use report_writer::{REPORT_SCHEMA, REPORT_SCHEMA_VERSION, render_report_json, write_report_json};
pub use validator::{ValidationConfig, ValidationOutcome, validate_submission};
