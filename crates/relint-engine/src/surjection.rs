use std::collections::BTreeSet;

use anyhow::Result;
use tracing::debug;

use relint_model::{COMPLEX_SURJECTION_TARGET, ErrorKind, FileType, KeyTuple, Phase};

use crate::collector::ErrorCollector;
use crate::digest::{DigestRegistry, EncounteredKeys};
use crate::overlay::DeletionOverlay;

/// Surjectivity: every parent PK must be referenced by at least one child
/// row. Simple relations are closed out right after their single child's
/// scan; the complex relation over the sample digest runs once, after every
/// contributing child has finished.
pub(crate) struct SurjectivityValidator<'a> {
    pub registry: &'a DigestRegistry,
    pub overlay: &'a DeletionOverlay,
    /// Parent types whose NEW file was actually scanned; decides which phase
    /// supplies the expected PK set.
    pub new_files_scanned: &'a BTreeSet<FileType>,
}

impl SurjectivityValidator<'_> {
    /// Check one parent's coverage after its designated child finished
    /// scanning. Errors are filed under the parent's bucket.
    pub fn validate_simple(
        &self,
        parent: FileType,
        encountered: &EncounteredKeys,
        collector: &mut ErrorCollector,
    ) -> Result<()> {
        let expected = self.expected_pks(parent)?;
        let empty = BTreeSet::new();
        let seen = encountered.for_parent(parent).unwrap_or(&empty);
        debug!(%parent, expected = expected.len(), encountered = seen.len(), "simple surjection");
        collect_missing(parent, &expected, seen, collector);
        Ok(())
    }

    /// The deferred check over the sample digest: the union of FKs from all
    /// contributing children must jointly cover it. Must run strictly after
    /// every contributing child's scan.
    pub fn validate_complex(
        &self,
        encountered: &EncounteredKeys,
        collector: &mut ErrorCollector,
    ) -> Result<()> {
        let target = COMPLEX_SURJECTION_TARGET;
        let expected = self.expected_pks(target)?;
        let empty = BTreeSet::new();
        let seen = encountered.for_parent(target).unwrap_or(&empty);
        debug!(%target, expected = expected.len(), encountered = seen.len(), "complex surjection");
        collect_missing(target, &expected, seen, collector);
        Ok(())
    }

    /// The PK set a parent's children must cover: the new digest when a new
    /// file superseded the baseline, the original digest otherwise. When
    /// falling back to the baseline, donors marked for deletion are not
    /// expected to be referenced any more.
    fn expected_pks(&self, parent: FileType) -> Result<BTreeSet<KeyTuple>> {
        if self.new_files_scanned.contains(&parent) {
            return Ok(self.registry.digest(parent, Phase::New)?.pks().clone());
        }
        let mut expected = self.registry.digest(parent, Phase::Original)?.pks().clone();
        if parent == FileType::Donor {
            expected.retain(|key| !self.overlay.is_marked_for_deletion(key));
        }
        Ok(expected)
    }
}

/// Size comparison first, enumeration of the difference only when the sizes
/// differ; one error per missing parent key.
fn collect_missing(
    parent: FileType,
    expected: &BTreeSet<KeyTuple>,
    encountered: &BTreeSet<KeyTuple>,
    collector: &mut ErrorCollector,
) {
    if expected.len() == encountered.len() {
        return;
    }
    for key in expected {
        if !encountered.contains(key) {
            collector.add_error(parent, ErrorKind::Surjection, None, key.clone());
        }
    }
}
