use std::collections::BTreeSet;

use tracing::warn;

use relint_ingest::{DeletionList, DeletionScope};
use relint_model::{ErrorKind, FileType, KeyTuple};

use crate::collector::ErrorCollector;

/// The validated deletion overlay: donor keys logically marked for removal.
///
/// A best-effort overlay, not a hard constraint: its findings are recorded
/// as well-formedness errors and the run continues; its only effects on the
/// cascade are the donor uniqueness exemption and the adjustment of
/// baseline-derived surjection expectations.
#[derive(Debug, Default)]
pub struct DeletionOverlay {
    donor_keys: BTreeSet<KeyTuple>,
}

impl DeletionOverlay {
    pub fn is_marked_for_deletion(&self, key: &KeyTuple) -> bool {
        self.donor_keys.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.donor_keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.donor_keys.len()
    }
}

/// Validate the deletion list against the known donor id sets and build the
/// overlay.
///
/// Every finding becomes one `WellFormedness` error filed under the donor
/// bucket; nothing here aborts the run.
pub fn validate_deletions(
    list: &DeletionList,
    original_donor_ids: &BTreeSet<String>,
    new_donor_ids: Option<&BTreeSet<String>>,
    collector: &mut ErrorCollector,
) -> DeletionOverlay {
    let mut donor_keys = BTreeSet::new();
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    for entry in &list.entries {
        let key = KeyTuple::from([entry.donor_id.as_str()]);
        let flag = |collector: &mut ErrorCollector| {
            collector.add_error(
                FileType::Donor,
                ErrorKind::WellFormedness,
                Some(entry.line_number),
                key.clone(),
            );
        };

        if !entry.well_formed {
            warn!(donor = %entry.donor_id, line = entry.line_number, "malformed deletion entry");
            flag(collector);
        }

        if !seen.insert(&entry.donor_id) {
            warn!(donor = %entry.donor_id, line = entry.line_number, "duplicate deletion entry");
            flag(collector);
        }

        let distinct: BTreeSet<&DeletionScope> = entry.scopes.iter().collect();
        if distinct.len() != entry.scopes.len() {
            warn!(donor = %entry.donor_id, "duplicate deletion scopes");
            flag(collector);
        }
        if entry.scopes.contains(&DeletionScope::Invalid) {
            warn!(donor = %entry.donor_id, "invalid deletion scope");
            flag(collector);
        }
        if entry.scopes.contains(&DeletionScope::All) && entry.scopes.len() > 1 {
            warn!(donor = %entry.donor_id, "scope 'all' combined with others");
            flag(collector);
        }

        // A donor can only be deleted if the baseline knows it.
        if !original_donor_ids.contains(&entry.donor_id) {
            warn!(donor = %entry.donor_id, "deletion of unknown donor");
            flag(collector);
        }

        donor_keys.insert(key);
    }

    // New clinical data fully supersedes the baseline, so the deletion list
    // and the new donor file must partition the original donors cleanly.
    if let Some(new_ids) = new_donor_ids {
        let listed = list.donor_ids();

        for donor_id in listed.intersection(new_ids) {
            warn!(donor = %donor_id, "donor both resubmitted and marked for deletion");
            collector.add_error(
                FileType::Donor,
                ErrorKind::WellFormedness,
                None,
                KeyTuple::from([donor_id.as_str()]),
            );
        }

        for donor_id in original_donor_ids {
            if !new_ids.contains(donor_id) && !listed.contains(donor_id) {
                warn!(donor = %donor_id, "donor dropped without a deletion entry");
                collector.add_error(
                    FileType::Donor,
                    ErrorKind::WellFormedness,
                    None,
                    KeyTuple::from([donor_id.as_str()]),
                );
            }
        }
    }

    DeletionOverlay { donor_keys }
}
