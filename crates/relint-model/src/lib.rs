#![deny(unsafe_code)]

//! Data contracts for the key/referential-integrity validator.
//!
//! This crate defines the closed set of submission file types and their
//! declarative key descriptors (the schema registry), the key tuple used for
//! both primary and foreign keys, the per-row key extraction, and the error
//! taxonomy shared by the validation engine and its callers.

mod error;
mod file_type;
mod keys;
mod report;

pub use error::{ModelError, Result};
pub use file_type::{COMPLEX_SURJECTION_TARGET, FileType, FileTypeDescriptor, Phase, descriptor};
pub use keys::{KeyTuple, Row};
pub use report::{ErrorKind, ErrorReport, ValidationError};
