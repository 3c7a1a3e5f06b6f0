use relint_model::{ErrorKind, ErrorReport, FileType, KeyTuple, ValidationError};
use tracing::{info, warn};

/// Aggregates validation errors for one run and produces the verdict.
///
/// One instance per run. The collector records what the scanners and the
/// surjectivity validator decided; it does not interpret or dedupe.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    report: ErrorReport,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(
        &mut self,
        file_type: FileType,
        kind: ErrorKind,
        line_number: Option<u64>,
        key: KeyTuple,
    ) {
        self.report.push(ValidationError {
            file_type,
            kind,
            line_number,
            key,
        });
    }

    pub fn report(&self) -> &ErrorReport {
        &self.report
    }

    /// Log per-type error counts and return the overall verdict: true iff no
    /// errors were recorded anywhere.
    pub fn describe(&self) -> bool {
        if self.report.is_valid() {
            info!("no key validation errors");
            return true;
        }
        for (file_type, bucket) in self.report.iter() {
            if bucket.is_empty() {
                continue;
            }
            for (kind, count) in self.report.counts_by_kind(file_type) {
                warn!(%file_type, %kind, count, "key validation errors");
            }
        }
        false
    }

    pub fn into_report(self) -> ErrorReport {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_is_the_verdict() {
        let mut collector = ErrorCollector::new();
        assert!(collector.describe());

        collector.add_error(
            FileType::Specimen,
            ErrorKind::Relation,
            Some(3),
            KeyTuple::from(["D9"]),
        );
        assert!(!collector.describe());
        assert_eq!(collector.report().total(), 1);
    }
}
