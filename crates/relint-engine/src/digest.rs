use std::collections::{BTreeMap, BTreeSet};

use relint_model::{FileType, KeyTuple, ModelError, Phase};

/// The primary-key set of one file, one phase.
///
/// Built append-only during its own scan; read-only afterwards. A missing
/// file yields an empty digest, not an error. Memory is bounded by the
/// number of distinct PKs, not by row count.
#[derive(Debug, Clone)]
pub struct FileDigest {
    file_type: FileType,
    phase: Phase,
    pks: BTreeSet<KeyTuple>,
}

impl FileDigest {
    pub fn empty(file_type: FileType, phase: Phase) -> Self {
        FileDigest {
            file_type,
            phase,
            pks: BTreeSet::new(),
        }
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn contains(&self, key: &KeyTuple) -> bool {
        self.pks.contains(key)
    }

    pub fn insert(&mut self, key: KeyTuple) {
        self.pks.insert(key);
    }

    pub fn pks(&self) -> &BTreeSet<KeyTuple> {
        &self.pks
    }

    pub fn len(&self) -> usize {
        self.pks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pks.is_empty()
    }
}

/// All digests of one run, keyed by file type and phase.
///
/// Built strictly in dependency order by the orchestrator; later steps only
/// ever look digests up by shared reference. A lookup that misses is a
/// plan-ordering bug, not a data condition.
#[derive(Debug, Default)]
pub struct DigestRegistry {
    digests: BTreeMap<(FileType, Phase), FileDigest>,
}

impl DigestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, digest: FileDigest) {
        self.digests
            .insert((digest.file_type(), digest.phase()), digest);
    }

    pub fn digest(&self, file_type: FileType, phase: Phase) -> Result<&FileDigest, ModelError> {
        self.digests
            .get(&(file_type, phase))
            .ok_or(ModelError::MissingDigest { file_type, phase })
    }

    /// True when the key is a PK of the type in either phase.
    pub fn resolves(&self, file_type: FileType, key: &KeyTuple) -> Result<bool, ModelError> {
        Ok(self.digest(file_type, Phase::Original)?.contains(key)
            || self.digest(file_type, Phase::New)?.contains(key))
    }
}

/// Per parent type, the foreign keys observed while scanning its children.
///
/// Only rows that passed the full classification cascade contribute; used
/// exclusively for surjectivity.
#[derive(Debug, Default)]
pub struct EncounteredKeys {
    keys: BTreeMap<FileType, BTreeSet<KeyTuple>>,
}

impl EncounteredKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, parent: FileType, key: KeyTuple) {
        self.keys.entry(parent).or_default().insert(key);
    }

    pub fn for_parent(&self, parent: FileType) -> Option<&BTreeSet<KeyTuple>> {
        self.keys.get(&parent)
    }
}
