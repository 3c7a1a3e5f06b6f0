use anyhow::Result;
use tracing::{debug, info};

use relint_ingest::TsvSource;
use relint_model::{ErrorKind, FileType, ModelError, Phase, Row, descriptor};

use crate::collector::ErrorCollector;
use crate::digest::{DigestRegistry, EncounteredKeys, FileDigest};
use crate::overlay::DeletionOverlay;

/// Shared lookups and sinks for one file scan.
///
/// The registry is read-only here: the digest under construction is owned by
/// the scan and only enters the registry once the scan completes.
pub(crate) struct ScanContext<'a> {
    pub registry: &'a DigestRegistry,
    pub overlay: &'a DeletionOverlay,
    pub encountered: &'a mut EncounteredKeys,
    pub collector: &'a mut ErrorCollector,
    /// Rows between progress log lines; operational only.
    pub progress_every: u64,
}

/// Scan a baseline file: collect its PK set, no validation. Original data
/// was accepted in an earlier release and is trusted.
pub(crate) fn scan_original_file(source: TsvSource, file_type: FileType) -> Result<FileDigest> {
    let spec = descriptor(file_type);
    check_header(&source, file_type)?;

    let mut digest = FileDigest::empty(file_type, Phase::Original);
    let mut rows = 0u64;
    for record in source {
        let record = record?;
        let row = Row::classify(spec, &record.fields, record.line_number)?;
        if let Some(pk) = row.pk {
            digest.insert(pk);
        }
        rows += 1;
    }
    info!(%file_type, rows, pks = digest.len(), "original digest built");
    Ok(digest)
}

/// Scan an incremental file, applying the full classification cascade per
/// row.
///
/// Checks run in strict priority order and the first match wins; an
/// offending row is recorded and then excluded from the digest and from
/// surjection credit. The scan always completes.
pub(crate) fn scan_new_file(
    source: TsvSource,
    file_type: FileType,
    ctx: &mut ScanContext<'_>,
) -> Result<FileDigest> {
    let spec = descriptor(file_type);
    check_header(&source, file_type)?;

    let original = ctx.registry.digest(file_type, Phase::Original)?;
    let mut digest = FileDigest::empty(file_type, Phase::New);
    let mut rows = 0u64;

    for record in source {
        let record = record?;
        let row = Row::classify(spec, &record.fields, record.line_number)?;
        debug!(%file_type, line = record.line_number, "row");

        rows += 1;
        if ctx.progress_every > 0 && rows % ctx.progress_every == 0 {
            info!(%file_type, rows, "rows processed");
        }

        // Uniqueness against the baseline. Donors marked for deletion are
        // exempt: their resubmission replaces the record being removed.
        if let Some(pk) = &row.pk {
            let deletion_exempt =
                file_type == FileType::Donor && ctx.overlay.is_marked_for_deletion(pk);
            if original.contains(pk) && !deletion_exempt {
                ctx.collector.add_error(
                    file_type,
                    ErrorKind::UniqueOriginal,
                    Some(record.line_number),
                    pk.clone(),
                );
                continue;
            }

            // Uniqueness within this same scan; the first occurrence stays
            // indexed, each later one is reported.
            if digest.contains(pk) {
                ctx.collector.add_error(
                    file_type,
                    ErrorKind::UniqueNew,
                    Some(record.line_number),
                    pk.clone(),
                );
                continue;
            }
        }

        // Foreign key must resolve in either phase of the parent. A
        // classified FK implies a declared parent (descriptor invariant).
        if let (Some(fk), Some(parent)) = (&row.fk, spec.parent) {
            if !ctx.registry.resolves(parent, fk)? {
                ctx.collector.add_error(
                    file_type,
                    ErrorKind::Relation,
                    Some(record.line_number),
                    fk.clone(),
                );
                continue;
            }
        }

        // A secondary FK is per-row optional; when supplied it must resolve
        // like the primary one.
        if let (Some(secondary_fk), Some(secondary_parent)) =
            (&row.secondary_fk, spec.secondary_parent)
        {
            if !ctx.registry.resolves(secondary_parent, secondary_fk)? {
                ctx.collector.add_error(
                    file_type,
                    ErrorKind::SecondaryRelation,
                    Some(record.line_number),
                    secondary_fk.clone(),
                );
                continue;
            }
        }

        // Valid row: index its PK and credit its parents for surjectivity.
        if let Some(pk) = row.pk {
            digest.insert(pk);
        }
        if let Some(fk) = row.fk {
            if let Some(parent) = spec.parent {
                ctx.encountered.add(parent, fk);
            }
        }
        if let Some(secondary_fk) = row.secondary_fk {
            if let Some(secondary_parent) = spec.secondary_parent {
                ctx.encountered.add(secondary_parent, secondary_fk);
            }
        }
    }

    info!(%file_type, rows, pks = digest.len(), "new digest built");
    Ok(digest)
}

/// The header must be wide enough for every declared key column; checked
/// once per file. Submitted files must match the expected column order
/// exactly, since extraction is positional.
fn check_header(source: &TsvSource, file_type: FileType) -> Result<()> {
    let expected = descriptor(file_type).min_columns();
    let actual = source.header().len();
    if actual < expected {
        return Err(ModelError::HeaderTooNarrow {
            file_type,
            expected,
            actual,
        }
        .into());
    }
    Ok(())
}
