use std::collections::BTreeSet;

use anyhow::Result;
use tracing::info;

use relint_ingest::{DeletionList, SubmissionLayout, TsvSource, parse_deletion_file, read_id_column};
use relint_model::{ErrorReport, FileType, Phase, descriptor};

use crate::collector::ErrorCollector;
use crate::digest::{DigestRegistry, EncounteredKeys, FileDigest};
use crate::overlay::{DeletionOverlay, validate_deletions};
use crate::scanner::{ScanContext, scan_new_file, scan_original_file};
use crate::surjection::SurjectivityValidator;

/// Rows between progress log lines by default.
const DEFAULT_PROGRESS_EVERY: u64 = 1_000_000;

/// One run's inputs. No global state: everything the orchestrator needs is
/// passed in here.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    pub layout: SubmissionLayout,
    /// Rows between progress log lines; operational only, does not affect
    /// the validation outcome.
    pub progress_every: u64,
}

impl ValidationConfig {
    pub fn new(layout: SubmissionLayout) -> Self {
        ValidationConfig {
            layout,
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }

    pub fn with_progress_every(mut self, progress_every: u64) -> Self {
        self.progress_every = progress_every;
        self
    }
}

/// The result handed back to the submission-lifecycle collaborator: a
/// complete report, and a verdict distinguishable from a fatal failure
/// (which surfaces as `Err` instead).
#[derive(Debug)]
pub struct ValidationOutcome {
    pub report: ErrorReport,
    pub is_valid: bool,
}

/// Run the full validation plan over one submission.
///
/// The plan is fixed: deletions, then original digests, then new digests in
/// parent-before-child order with simple surjection closed out as each child
/// finishes, then the complex surjection over the sample digest. Digests
/// stay resident for the whole run; each file is scanned exactly once.
pub fn validate_submission(config: &ValidationConfig) -> Result<ValidationOutcome> {
    let layout = &config.layout;
    layout.verify()?;

    let mut collector = ErrorCollector::new();
    let mut registry = DigestRegistry::new();
    let mut encountered = EncounteredKeys::new();

    // Deletions first: they only need the raw donor id columns.
    let overlay = build_overlay(layout, &mut collector)?;

    // Baseline digests: trusted, lookup-only. A missing file is an empty
    // baseline.
    for file_type in FileType::ALL {
        let digest = match layout.existing_data_file(Phase::Original, file_type) {
            Some(path) => scan_original_file(TsvSource::open(&path)?, file_type)?,
            None => FileDigest::empty(file_type, Phase::Original),
        };
        registry.insert(digest);
    }

    // Incremental digests, parents strictly before children. Each new scan
    // consults the already-registered digests of its parents.
    let mut new_files_scanned: BTreeSet<FileType> = BTreeSet::new();
    if !layout.has_new_clinical() {
        info!("no new donor file; the baseline donor digest stays authoritative");
    }

    for file_type in FileType::ALL {
        let digest = match layout.existing_data_file(Phase::New, file_type) {
            Some(path) => {
                let mut ctx = ScanContext {
                    registry: &registry,
                    overlay: &overlay,
                    encountered: &mut encountered,
                    collector: &mut collector,
                    progress_every: config.progress_every,
                };
                let digest = scan_new_file(TsvSource::open(&path)?, file_type, &mut ctx)?;
                new_files_scanned.insert(file_type);
                digest
            }
            None => FileDigest::empty(file_type, Phase::New),
        };
        registry.insert(digest);

        // Simple surjection immediately after the child that carries the
        // relation; skipped entirely when the child file was absent.
        let spec = descriptor(file_type);
        if spec.has_simple_surjective_relation && new_files_scanned.contains(&file_type) {
            let parent = spec.parent.expect("simple surjection implies a parent");
            let surjectivity = SurjectivityValidator {
                registry: &registry,
                overlay: &overlay,
                new_files_scanned: &new_files_scanned,
            };
            surjectivity.validate_simple(parent, &encountered, &mut collector)?;
        }
    }

    // The one join point: sample coverage over the union of all meta-file
    // references, checked only after every contributing scan finished.
    let surjectivity = SurjectivityValidator {
        registry: &registry,
        overlay: &overlay,
        new_files_scanned: &new_files_scanned,
    };
    surjectivity.validate_complex(&encountered, &mut collector)?;

    let is_valid = collector.describe();
    Ok(ValidationOutcome {
        report: collector.into_report(),
        is_valid,
    })
}

/// Parse and validate the deletion list, if any, against the donor id
/// columns read straight off the donor files.
fn build_overlay(
    layout: &SubmissionLayout,
    collector: &mut ErrorCollector,
) -> Result<DeletionOverlay> {
    let list = match layout.existing_deletion_file() {
        Some(path) => {
            info!(path = %path.display(), "parsing deletion list");
            parse_deletion_file(&path)?
        }
        None => DeletionList::empty(),
    };
    if list.is_empty() {
        return Ok(DeletionOverlay::default());
    }

    let donor_column = descriptor(FileType::Donor).pk_columns.expect("donor pk")[0];
    let original_ids = read_id_column(
        &layout.data_file(Phase::Original, FileType::Donor),
        donor_column,
    )?;
    let new_ids = if layout.has_new_clinical() {
        Some(read_id_column(
            &layout.data_file(Phase::New, FileType::Donor),
            donor_column,
        )?)
    } else {
        None
    };

    Ok(validate_deletions(
        &list,
        &original_ids,
        new_ids.as_ref(),
        collector,
    ))
}
