use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::file_type::FileType;
use crate::keys::KeyTuple;

/// The kinds of recoverable validation errors a run can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A new PK collides with one already accepted in the original data.
    UniqueOriginal,
    /// A new PK collides with an earlier row of the same new file.
    UniqueNew,
    /// An FK resolves to no parent PK in either phase.
    Relation,
    /// A supplied secondary FK resolves to no parent PK in either phase.
    SecondaryRelation,
    /// A parent PK referenced by no child row.
    Surjection,
    /// A problem with the deletion list itself.
    WellFormedness,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::UniqueOriginal => "unique_original",
            ErrorKind::UniqueNew => "unique_new",
            ErrorKind::Relation => "relation",
            ErrorKind::SecondaryRelation => "secondary_relation",
            ErrorKind::Surjection => "surjection",
            ErrorKind::WellFormedness => "well_formedness",
        };
        f.write_str(name)
    }
}

/// One recorded validation error.
///
/// `line_number` is the physical line in the offending file (the header is
/// line 1); surjection and well-formedness errors carry no line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub file_type: FileType,
    pub kind: ErrorKind,
    pub line_number: Option<u64>,
    pub key: KeyTuple,
}

/// All errors of one run, bucketed per file type in recording order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorReport {
    errors: BTreeMap<FileType, Vec<ValidationError>>,
}

impl ErrorReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.entry(error.file_type).or_default().push(error);
    }

    /// True iff no errors were recorded anywhere.
    pub fn is_valid(&self) -> bool {
        self.errors.values().all(|bucket| bucket.is_empty())
    }

    pub fn total(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn errors_for(&self, file_type: FileType) -> &[ValidationError] {
        self.errors
            .get(&file_type)
            .map_or(&[], |bucket| bucket.as_slice())
    }

    /// Buckets in file-type order; empty buckets are not materialized.
    pub fn iter(&self) -> impl Iterator<Item = (FileType, &[ValidationError])> {
        self.errors
            .iter()
            .map(|(file_type, bucket)| (*file_type, bucket.as_slice()))
    }

    /// Error counts per kind for one file type, in kind order.
    pub fn counts_by_kind(&self, file_type: FileType) -> BTreeMap<ErrorKind, usize> {
        let mut counts = BTreeMap::new();
        for error in self.errors_for(file_type) {
            *counts.entry(error.kind).or_insert(0) += 1;
        }
        counts
    }
}
