use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of submission file types subject to key validation.
///
/// The clinical core (donor/specimen/sample) is always expected; the assay
/// types come in meta/primary(/secondary) groups and are optional per
/// submission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    Donor,
    Specimen,
    Sample,
    SsmM,
    SsmP,
    CnsmM,
    CnsmP,
    CnsmS,
}

/// Which data set a scan is working over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Previously accepted data; trusted, used for lookups only.
    Original,
    /// The incremental submission under validation.
    New,
}

impl FileType {
    /// All file types in load order: parents strictly before children.
    pub const ALL: [FileType; 8] = [
        FileType::Donor,
        FileType::Specimen,
        FileType::Sample,
        FileType::SsmM,
        FileType::SsmP,
        FileType::CnsmM,
        FileType::CnsmP,
        FileType::CnsmS,
    ];

    /// The clinical core, in parent-before-child order.
    pub const CLINICAL: [FileType; 3] = [FileType::Donor, FileType::Specimen, FileType::Sample];

    /// The assay types, in parent-before-child order.
    pub const ASSAY: [FileType; 5] = [
        FileType::SsmM,
        FileType::SsmP,
        FileType::CnsmM,
        FileType::CnsmP,
        FileType::CnsmS,
    ];

    pub fn is_clinical(self) -> bool {
        matches!(self, FileType::Donor | FileType::Specimen | FileType::Sample)
    }

    /// Canonical on-disk file name for this type.
    pub fn file_name(self) -> &'static str {
        match self {
            FileType::Donor => "donor.txt",
            FileType::Specimen => "specimen.txt",
            FileType::Sample => "sample.txt",
            FileType::SsmM => "ssm_m.txt",
            FileType::SsmP => "ssm_p.txt",
            FileType::CnsmM => "cnsm_m.txt",
            FileType::CnsmP => "cnsm_p.txt",
            FileType::CnsmS => "cnsm_s.txt",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileType::Donor => "donor",
            FileType::Specimen => "specimen",
            FileType::Sample => "sample",
            FileType::SsmM => "ssm_m",
            FileType::SsmP => "ssm_p",
            FileType::CnsmM => "cnsm_m",
            FileType::CnsmP => "cnsm_p",
            FileType::CnsmS => "cnsm_s",
        };
        f.write_str(name)
    }
}

/// Declarative key descriptor for one file type.
///
/// Column positions are 0-based indices into the tab-split row; submitted
/// files must match the expected column order exactly, since extraction is
/// positional, not header-name based.
#[derive(Debug, Clone, Copy)]
pub struct FileTypeDescriptor {
    pub file_type: FileType,
    pub pk_columns: Option<&'static [usize]>,
    pub fk_columns: Option<&'static [usize]>,
    pub secondary_fk_columns: Option<&'static [usize]>,
    pub parent: Option<FileType>,
    pub secondary_parent: Option<FileType>,
    /// Parent coverage is checked right after this child's NEW scan.
    pub has_simple_surjective_relation: bool,
    /// Encountered FKs accumulate into the deferred sample coverage check.
    pub feeds_complex_surjection: bool,
}

impl FileTypeDescriptor {
    /// Minimum column count a row of this type must have for every declared
    /// key column to exist.
    pub fn min_columns(&self) -> usize {
        let max = |cols: Option<&'static [usize]>| {
            cols.and_then(|c| c.iter().max().copied())
                .map_or(0, |i| i + 1)
        };
        max(self.pk_columns)
            .max(max(self.fk_columns))
            .max(max(self.secondary_fk_columns))
    }

    pub fn has_pk(&self) -> bool {
        self.pk_columns.is_some()
    }

    pub fn has_fk(&self) -> bool {
        self.fk_columns.is_some()
    }

    pub fn has_secondary_fk(&self) -> bool {
        self.secondary_fk_columns.is_some()
    }
}

const DONOR_PKS: &[usize] = &[0];
const SPECIMEN_PKS: &[usize] = &[1];
const SPECIMEN_FKS: &[usize] = &[0];
const SAMPLE_PKS: &[usize] = &[0];
const SAMPLE_FKS: &[usize] = &[1];
const SSM_M_PKS: &[usize] = &[0, 1];
const SSM_M_FKS: &[usize] = &[1];
const SSM_M_SECONDARY_FKS: &[usize] = &[2];
const SSM_P_FKS: &[usize] = &[0, 1];
const CNSM_M_PKS: &[usize] = &[0, 1];
const CNSM_M_FKS: &[usize] = &[1];
const CNSM_M_SECONDARY_FKS: &[usize] = &[2];
const CNSM_P_PKS: &[usize] = &[0, 1, 2];
const CNSM_P_FKS: &[usize] = &[0, 1];
const CNSM_S_FKS: &[usize] = &[0, 1, 2];

/// The schema registry: one static descriptor per file type.
pub fn descriptor(file_type: FileType) -> &'static FileTypeDescriptor {
    match file_type {
        FileType::Donor => &FileTypeDescriptor {
            file_type: FileType::Donor,
            pk_columns: Some(DONOR_PKS),
            fk_columns: None,
            secondary_fk_columns: None,
            parent: None,
            secondary_parent: None,
            has_simple_surjective_relation: false,
            feeds_complex_surjection: false,
        },
        FileType::Specimen => &FileTypeDescriptor {
            file_type: FileType::Specimen,
            pk_columns: Some(SPECIMEN_PKS),
            fk_columns: Some(SPECIMEN_FKS),
            secondary_fk_columns: None,
            parent: Some(FileType::Donor),
            secondary_parent: None,
            has_simple_surjective_relation: true,
            feeds_complex_surjection: false,
        },
        FileType::Sample => &FileTypeDescriptor {
            file_type: FileType::Sample,
            pk_columns: Some(SAMPLE_PKS),
            fk_columns: Some(SAMPLE_FKS),
            secondary_fk_columns: None,
            parent: Some(FileType::Specimen),
            secondary_parent: None,
            has_simple_surjective_relation: true,
            feeds_complex_surjection: false,
        },
        FileType::SsmM => &FileTypeDescriptor {
            file_type: FileType::SsmM,
            pk_columns: Some(SSM_M_PKS),
            fk_columns: Some(SSM_M_FKS),
            secondary_fk_columns: Some(SSM_M_SECONDARY_FKS),
            parent: Some(FileType::Sample),
            secondary_parent: Some(FileType::Sample),
            has_simple_surjective_relation: false,
            feeds_complex_surjection: true,
        },
        FileType::SsmP => &FileTypeDescriptor {
            file_type: FileType::SsmP,
            pk_columns: None,
            fk_columns: Some(SSM_P_FKS),
            secondary_fk_columns: None,
            parent: Some(FileType::SsmM),
            secondary_parent: None,
            has_simple_surjective_relation: true,
            feeds_complex_surjection: false,
        },
        FileType::CnsmM => &FileTypeDescriptor {
            file_type: FileType::CnsmM,
            pk_columns: Some(CNSM_M_PKS),
            fk_columns: Some(CNSM_M_FKS),
            secondary_fk_columns: Some(CNSM_M_SECONDARY_FKS),
            parent: Some(FileType::Sample),
            secondary_parent: Some(FileType::Sample),
            has_simple_surjective_relation: false,
            feeds_complex_surjection: true,
        },
        FileType::CnsmP => &FileTypeDescriptor {
            file_type: FileType::CnsmP,
            pk_columns: Some(CNSM_P_PKS),
            fk_columns: Some(CNSM_P_FKS),
            secondary_fk_columns: None,
            parent: Some(FileType::CnsmM),
            secondary_parent: None,
            has_simple_surjective_relation: true,
            feeds_complex_surjection: false,
        },
        FileType::CnsmS => &FileTypeDescriptor {
            file_type: FileType::CnsmS,
            pk_columns: None,
            fk_columns: Some(CNSM_S_FKS),
            secondary_fk_columns: None,
            parent: Some(FileType::CnsmP),
            secondary_parent: None,
            has_simple_surjective_relation: false,
            feeds_complex_surjection: false,
        },
    }
}

/// The complex-surjection target: the one type referenced by multiple
/// independent child relations.
pub const COMPLEX_SURJECTION_TARGET: FileType = FileType::Sample;
