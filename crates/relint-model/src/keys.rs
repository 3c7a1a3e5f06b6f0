use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::file_type::FileTypeDescriptor;

/// Value codes that mean "no matched sample" in an optional secondary FK
/// column. A key containing one of these is treated as absent, not invalid.
const MISSING_VALUE_CODES: &[&str] = &["", "-777", "-888", "-999"];

/// An immutable, orderable key of one to three string components.
///
/// Used for both primary and foreign keys; equality and ordering compare the
/// components value-wise. Ordering exists only so keys can live in ordered
/// sets — it carries no business meaning.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeyTuple(Vec<String>);

impl KeyTuple {
    /// Extract the key at the given column positions of a tab-split row.
    ///
    /// The caller guarantees every index is in range (checked once per file
    /// against the descriptor's minimum column count).
    pub fn from_record(record: &[String], columns: &[usize]) -> Self {
        KeyTuple(columns.iter().map(|&i| record[i].clone()).collect())
    }

    pub fn components(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when any component carries a missing-value code; such a key is
    /// treated as not supplied rather than as a dangling reference.
    fn is_missing_coded(&self) -> bool {
        self.0
            .iter()
            .any(|c| MISSING_VALUE_CODES.contains(&c.trim()))
    }
}

impl fmt::Display for KeyTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("|"))
    }
}

impl<const N: usize> From<[&str; N]> for KeyTuple {
    fn from(components: [&str; N]) -> Self {
        KeyTuple(components.iter().map(|c| (*c).to_string()).collect())
    }
}

/// The keys extracted from one row, per the owning type's descriptor.
///
/// Exactly the keys the descriptor declares are present, except the
/// secondary FK, which is additionally per-row optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub pk: Option<KeyTuple>,
    pub fk: Option<KeyTuple>,
    pub secondary_fk: Option<KeyTuple>,
}

impl Row {
    /// Classify one tab-split record against its type's descriptor.
    ///
    /// Fails only on a structural contract violation (row narrower than the
    /// declared key columns require), never on user data.
    pub fn classify(
        descriptor: &FileTypeDescriptor,
        record: &[String],
        line_number: u64,
    ) -> Result<Row> {
        let expected = descriptor.min_columns();
        if record.len() < expected {
            return Err(ModelError::RowTooNarrow {
                file_type: descriptor.file_type,
                line_number,
                expected,
                actual: record.len(),
            });
        }

        let pk = descriptor
            .pk_columns
            .map(|columns| KeyTuple::from_record(record, columns));
        let fk = descriptor
            .fk_columns
            .map(|columns| KeyTuple::from_record(record, columns));
        let secondary_fk = descriptor
            .secondary_fk_columns
            .map(|columns| KeyTuple::from_record(record, columns))
            .filter(|key| !key.is_missing_coded());

        Ok(Row {
            pk,
            fk,
            secondary_fk,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_type::{FileType, descriptor};

    use proptest::prelude::*;

    fn record(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| (*f).to_string()).collect()
    }

    #[test]
    fn classify_donor_extracts_pk_only() {
        let row = Row::classify(descriptor(FileType::Donor), &record(&["D1", "x"]), 2).unwrap();
        assert_eq!(row.pk, Some(KeyTuple::from(["D1"])));
        assert_eq!(row.fk, None);
        assert_eq!(row.secondary_fk, None);
    }

    #[test]
    fn classify_specimen_extracts_pk_and_fk_positionally() {
        let row =
            Row::classify(descriptor(FileType::Specimen), &record(&["D1", "SP1"]), 2).unwrap();
        assert_eq!(row.pk, Some(KeyTuple::from(["SP1"])));
        assert_eq!(row.fk, Some(KeyTuple::from(["D1"])));
    }

    #[test]
    fn classify_ssm_m_with_missing_matched_sample_drops_secondary_fk() {
        let d = descriptor(FileType::SsmM);
        let row = Row::classify(d, &record(&["AN1", "A1", "-888"]), 2).unwrap();
        assert_eq!(row.pk, Some(KeyTuple::from(["AN1", "A1"])));
        assert_eq!(row.fk, Some(KeyTuple::from(["A1"])));
        assert_eq!(row.secondary_fk, None);

        let row = Row::classify(d, &record(&["AN1", "A1", "A2"]), 2).unwrap();
        assert_eq!(row.secondary_fk, Some(KeyTuple::from(["A2"])));
    }

    #[test]
    fn classify_rejects_rows_narrower_than_declared_keys() {
        let err = Row::classify(descriptor(FileType::CnsmP), &record(&["a", "b"]), 7).unwrap_err();
        assert!(matches!(
            err,
            ModelError::RowTooNarrow {
                file_type: FileType::CnsmP,
                line_number: 7,
                expected: 3,
                actual: 2,
            }
        ));
    }

    #[test]
    fn key_tuple_equality_is_value_based() {
        assert_eq!(KeyTuple::from(["D1", "S1"]), KeyTuple::from(["D1", "S1"]));
        assert_ne!(KeyTuple::from(["D1"]), KeyTuple::from(["D2"]));
        assert_ne!(KeyTuple::from(["D1"]), KeyTuple::from(["D1", ""]));
    }

    proptest! {
        #[test]
        fn key_tuple_ordering_matches_component_ordering(
            a in proptest::collection::vec("[a-z]{0,4}", 1..=3),
            b in proptest::collection::vec("[a-z]{0,4}", 1..=3),
        ) {
            let ka = KeyTuple(a.clone());
            let kb = KeyTuple(b.clone());
            prop_assert_eq!(ka.cmp(&kb), a.cmp(&b));
            prop_assert_eq!(ka == kb, a == b);
        }
    }
}
