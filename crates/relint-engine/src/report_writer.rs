use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use relint_model::{ErrorKind, ErrorReport, FileType, KeyTuple};

pub const REPORT_SCHEMA: &str = "relint.key-validation-report";
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// On-disk report payload.
///
/// Deliberately deterministic: identical inputs produce a byte-for-byte
/// identical file, so no timestamps or host details belong here.
#[derive(Debug, Serialize)]
struct ReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    is_valid: bool,
    total_errors: usize,
    files: Vec<FileErrors<'a>>,
}

#[derive(Debug, Serialize)]
struct FileErrors<'a> {
    file_type: FileType,
    errors: Vec<ErrorJson<'a>>,
}

#[derive(Debug, Serialize)]
struct ErrorJson<'a> {
    kind: ErrorKind,
    line_number: Option<u64>,
    key: &'a KeyTuple,
}

/// Render the report as pretty JSON.
pub fn render_report_json(report: &ErrorReport) -> Result<String> {
    let payload = ReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        is_valid: report.is_valid(),
        total_errors: report.total(),
        files: report
            .iter()
            .map(|(file_type, errors)| FileErrors {
                file_type,
                errors: errors
                    .iter()
                    .map(|error| ErrorJson {
                        kind: error.kind,
                        line_number: error.line_number,
                        key: &error.key,
                    })
                    .collect(),
            })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&payload)?;
    Ok(format!("{json}\n"))
}

pub fn write_report_json(path: &Path, report: &ErrorReport) -> Result<()> {
    std::fs::write(path, render_report_json(report)?)?;
    Ok(())
}
