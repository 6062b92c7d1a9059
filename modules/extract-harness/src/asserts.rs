//! Assertions over extracted metadata.
//!
//! Two layers: `verify_*` returns an [`AssertionFailure`] on mismatch, and
//! `assert_*` panics with it so the calling test fails. Only the fields a test
//! lists are checked.
//!
//! For extractions that yield several records, iterate and check each record
//! yourself; the order extractors return records in is not guaranteed.

use std::collections::BTreeMap;

use tracing::trace;

use crate::error::AssertionFailure;
use crate::metadata::{MetadataField, MetadataRecord};

/// Expected values keyed by field. Multi-valued fields take the canonical
/// list rendering, e.g. `"[Doe, Jane, Roe, Rick]"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedFields {
    fields: BTreeMap<MetadataField, String>,
}

impl ExpectedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: MetadataField, expected: impl Into<String>) -> Self {
        self.insert(field, expected);
        self
    }

    pub fn insert(&mut self, field: MetadataField, expected: impl Into<String>) {
        self.fields.insert(field, expected.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetadataField, &str)> {
        self.fields.iter().map(|(field, value)| (*field, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<S: Into<String>, const N: usize> From<[(MetadataField, S); N]> for ExpectedFields {
    fn from(entries: [(MetadataField, S); N]) -> Self {
        let mut expected = Self::new();
        for (field, value) in entries {
            expected.insert(field, value);
        }
        expected
    }
}

// ---------------------------------------------------------------------------
// verify_*: non-panicking
// ---------------------------------------------------------------------------

pub fn verify_field(
    record: &MetadataRecord,
    field: MetadataField,
    expected: &str,
) -> Result<(), AssertionFailure> {
    let kind = field.kind();
    if kind.matches(record, field.key(), expected) {
        return Ok(());
    }
    Err(AssertionFailure::FieldMismatch {
        field: field.key().to_string(),
        expected: expected.to_string(),
        actual: kind.render(record, field.key()),
    })
}

pub fn verify_fields(
    record: &MetadataRecord,
    expected: &ExpectedFields,
) -> Result<(), AssertionFailure> {
    trace!("verify_fields:\n{}", record.pretty(2));
    for (field, value) in expected.iter() {
        verify_field(record, field, value)?;
    }
    Ok(())
}

fn sole_record(records: &[MetadataRecord]) -> Result<&MetadataRecord, AssertionFailure> {
    match records {
        [record] => Ok(record),
        _ => Err(AssertionFailure::CountMismatch {
            expected: 1,
            actual: records.len(),
        }),
    }
}

/// Requires exactly one record, then checks one field on it.
pub fn verify_single_record(
    records: &[MetadataRecord],
    field: MetadataField,
    expected: &str,
) -> Result<(), AssertionFailure> {
    verify_field(sole_record(records)?, field, expected)
}

/// Requires exactly one record, then checks every listed field on it.
pub fn verify_single_record_fields(
    records: &[MetadataRecord],
    expected: &ExpectedFields,
) -> Result<(), AssertionFailure> {
    verify_fields(sole_record(records)?, expected)
}

// ---------------------------------------------------------------------------
// assert_*: panic on mismatch
// ---------------------------------------------------------------------------

#[track_caller]
fn fail_on(result: Result<(), AssertionFailure>) {
    if let Err(failure) = result {
        panic!("metadata assertion failed: {failure}");
    }
}

#[track_caller]
pub fn assert_field(record: &MetadataRecord, field: MetadataField, expected: &str) {
    fail_on(verify_field(record, field, expected));
}

#[track_caller]
pub fn assert_fields(record: &MetadataRecord, expected: &ExpectedFields) {
    fail_on(verify_fields(record, expected));
}

#[track_caller]
pub fn assert_single_record(records: &[MetadataRecord], field: MetadataField, expected: &str) {
    fail_on(verify_single_record(records, field, expected));
}

#[track_caller]
pub fn assert_single_record_fields(records: &[MetadataRecord], expected: &ExpectedFields) {
    fail_on(verify_single_record_fields(records, expected));
}

// ---------------------------------------------------------------------------
// Debug dumps
// ---------------------------------------------------------------------------

/// Pretty-print one record and emit it at trace level.
pub fn dump_record(record: &MetadataRecord) -> String {
    let rendered = record.pretty(2);
    trace!("{rendered}");
    rendered
}

/// Pretty-print every record, in order.
pub fn dump_records(records: &[MetadataRecord]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| format!("record {i}:\n{}", dump_record(record)))
        .collect()
}
