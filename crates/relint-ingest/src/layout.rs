use std::path::{Path, PathBuf};

use relint_model::{FileType, Phase};

use crate::error::{IngestError, Result};

/// Default name of the deletion list inside the new-data directory.
const DELETION_FILE_NAME: &str = "to_be_removed.txt";

/// Resolves the on-disk location of every submission file.
///
/// A submission is a baseline ("original") directory and an incremental
/// ("new") directory holding files named after their type, plus an optional
/// deletion list. Absence of any data file is legal; presence drives which
/// scans the orchestrator runs.
#[derive(Debug, Clone)]
pub struct SubmissionLayout {
    original_dir: PathBuf,
    new_dir: PathBuf,
    deletion_file: Option<PathBuf>,
}

impl SubmissionLayout {
    pub fn new(original_dir: impl Into<PathBuf>, new_dir: impl Into<PathBuf>) -> Self {
        SubmissionLayout {
            original_dir: original_dir.into(),
            new_dir: new_dir.into(),
            deletion_file: None,
        }
    }

    /// Override the deletion-list location.
    pub fn with_deletion_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.deletion_file = Some(path.into());
        self
    }

    /// Both directories must exist up front; everything inside them is
    /// optional.
    pub fn verify(&self) -> Result<()> {
        for dir in [&self.original_dir, &self.new_dir] {
            if !dir.is_dir() {
                return Err(IngestError::DirectoryNotFound { path: dir.clone() });
            }
        }
        Ok(())
    }

    pub fn data_file(&self, phase: Phase, file_type: FileType) -> PathBuf {
        let dir = match phase {
            Phase::Original => &self.original_dir,
            Phase::New => &self.new_dir,
        };
        dir.join(file_type.file_name())
    }

    /// The data file's path, if it exists on disk.
    pub fn existing_data_file(&self, phase: Phase, file_type: FileType) -> Option<PathBuf> {
        let path = self.data_file(phase, file_type);
        path.is_file().then_some(path)
    }

    pub fn has_file(&self, phase: Phase, file_type: FileType) -> bool {
        self.data_file(phase, file_type).is_file()
    }

    /// New clinical data supersedes the baseline; presence is keyed off the
    /// donor file.
    pub fn has_new_clinical(&self) -> bool {
        self.has_file(Phase::New, FileType::Donor)
    }

    /// The deletion list's path, if one exists (explicit override or the
    /// default location).
    pub fn existing_deletion_file(&self) -> Option<PathBuf> {
        let path = self
            .deletion_file
            .clone()
            .unwrap_or_else(|| self.new_dir.join(DELETION_FILE_NAME));
        path.is_file().then_some(path)
    }

    pub fn original_dir(&self) -> &Path {
        &self.original_dir
    }

    pub fn new_dir(&self) -> &Path {
        &self.new_dir
    }
}
