use std::collections::BTreeSet;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::tsv::TsvSource;

/// What a deletion entry asks to remove for one donor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeletionScope {
    /// The donor and everything under it.
    All,
    Ssm,
    Cnsm,
    /// An unrecognized scope token; kept so the overlay can report it
    /// instead of failing the parse.
    Invalid,
}

impl DeletionScope {
    fn parse(token: &str) -> DeletionScope {
        match token.trim() {
            "all" => DeletionScope::All,
            "ssm" => DeletionScope::Ssm,
            "cnsm" => DeletionScope::Cnsm,
            _ => DeletionScope::Invalid,
        }
    }
}

/// One line of the deletion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionEntry {
    pub line_number: u64,
    pub donor_id: String,
    pub scopes: Vec<DeletionScope>,
    /// False when the line did not have exactly two columns.
    pub well_formed: bool,
}

/// The parsed deletion list, in file order.
///
/// Parsing never fails on content: malformed lines and unknown scopes are
/// preserved as such so the deletion overlay can report them as
/// well-formedness errors while the run continues.
#[derive(Debug, Clone, Default)]
pub struct DeletionList {
    pub entries: Vec<DeletionEntry>,
}

impl DeletionList {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct donor ids marked for removal.
    pub fn donor_ids(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .map(|entry| entry.donor_id.clone())
            .collect()
    }
}

/// Parse the deletion list: tab-separated, header line, then one
/// `donor_id <TAB> scope[,scope...]` entry per line.
///
/// The file is assumed small relative to the data files.
pub fn parse_deletion_file(path: &Path) -> Result<DeletionList> {
    let mut entries = Vec::new();
    for record in TsvSource::open(path)? {
        let record = record?;
        debug!(line = record.line_number, fields = ?record.fields, "deletion entry");

        let well_formed = record.fields.len() == 2;
        let donor_id = record.fields.first().cloned().unwrap_or_default();
        let scopes = record
            .fields
            .get(1)
            .map(|raw| raw.split(',').map(DeletionScope::parse).collect())
            .unwrap_or_default();

        entries.push(DeletionEntry {
            line_number: record.line_number,
            donor_id,
            scopes,
            well_formed,
        });
    }
    Ok(DeletionList { entries })
}
