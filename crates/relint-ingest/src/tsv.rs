use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// One data record of a tab-separated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsvRecord {
    /// Physical line number in the file; the header is line 1.
    pub line_number: u64,
    pub fields: Vec<String>,
}

/// A tab-separated file opened for one sequential scan.
///
/// The header line is consumed on open and kept for width checks; iteration
/// yields data records only, skipping lines that are blank after trimming.
pub struct TsvSource {
    path: PathBuf,
    header: Vec<String>,
    records: csv::StringRecordsIntoIter<File>,
}

impl TsvSource {
    pub fn open(path: &Path) -> Result<TsvSource> {
        let file = File::open(path).map_err(|source| IngestError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut header_record = csv::StringRecord::new();
        let has_header = reader
            .read_record(&mut header_record)
            .map_err(|source| IngestError::RecordRead {
                path: path.to_path_buf(),
                source,
            })?;
        if !has_header {
            return Err(IngestError::MissingHeader {
                path: path.to_path_buf(),
            });
        }
        let header = header_record.iter().map(str::to_string).collect();

        Ok(TsvSource {
            path: path.to_path_buf(),
            header,
            records: reader.into_records(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }
}

impl Iterator for TsvSource {
    type Item = Result<TsvRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(source) => {
                    return Some(Err(IngestError::RecordRead {
                        path: self.path.clone(),
                        source,
                    }));
                }
            };

            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            let line_number = record.position().map_or(0, |p| p.line());
            return Some(Ok(TsvRecord {
                line_number,
                fields: record.iter().map(str::to_string).collect(),
            }));
        }
    }
}

/// Read one identifier column straight off a data file, without digesting.
///
/// Used by the deletion overlay, which needs the donor-id sets before any
/// digest has been built. A missing file yields the empty set.
pub fn read_id_column(path: &Path, column: usize) -> Result<BTreeSet<String>> {
    if !path.is_file() {
        return Ok(BTreeSet::new());
    }
    let mut ids = BTreeSet::new();
    for record in TsvSource::open(path)? {
        let record = record?;
        if let Some(id) = record.fields.get(column) {
            ids.insert(id.clone());
        }
    }
    Ok(ids)
}
