//! Metadata records as produced by an extractor under test.
//!
//! A record maps field keys to one value or an ordered list of values. Which
//! of the two a field holds is declared by its [`FieldKind`], so the same key
//! is always read the same way by extractors and by the assertion helpers.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Field identifiers
// ---------------------------------------------------------------------------

/// Cardinality of a metadata field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    SingleValued,
    MultiValued,
}

impl FieldKind {
    /// Render what `record` holds for `key` in the form expectations are
    /// written in: the scalar itself, or the canonical list rendering.
    /// A missing scalar renders as `None`; a missing list renders as `[]`.
    pub fn render(&self, record: &MetadataRecord, key: &str) -> Option<String> {
        match self {
            FieldKind::SingleValued => record.scalar(key).map(str::to_string),
            FieldKind::MultiValued => Some(render_list(record.list(key))),
        }
    }

    /// Exact, case- and whitespace-sensitive comparison against `expected`.
    pub fn matches(&self, record: &MetadataRecord, key: &str, expected: &str) -> bool {
        match self {
            FieldKind::SingleValued => record.scalar(key) == Some(expected),
            FieldKind::MultiValued => render_list(record.list(key)) == expected,
        }
    }
}

/// A metadata field identifier together with its declared cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MetadataField {
    key: &'static str,
    kind: FieldKind,
}

impl MetadataField {
    pub const fn single(key: &'static str) -> Self {
        Self {
            key,
            kind: FieldKind::SingleValued,
        }
    }

    pub const fn multi(key: &'static str) -> Self {
        Self {
            key,
            kind: FieldKind::MultiValued,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_multi(&self) -> bool {
        self.kind == FieldKind::MultiValued
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key)
    }
}

// Bibliographic fields most source extractors emit.
pub const FIELD_ACCESS_URL: MetadataField = MetadataField::single("access.url");
pub const FIELD_ARTICLE_TITLE: MetadataField = MetadataField::single("article.title");
pub const FIELD_AUTHOR: MetadataField = MetadataField::multi("author");
pub const FIELD_DATE: MetadataField = MetadataField::single("date");
pub const FIELD_DOI: MetadataField = MetadataField::single("doi");
pub const FIELD_EISSN: MetadataField = MetadataField::single("eissn");
pub const FIELD_END_PAGE: MetadataField = MetadataField::single("page.end");
pub const FIELD_ISBN: MetadataField = MetadataField::single("isbn");
pub const FIELD_ISSN: MetadataField = MetadataField::single("issn");
pub const FIELD_ISSUE: MetadataField = MetadataField::single("issue");
pub const FIELD_KEYWORDS: MetadataField = MetadataField::multi("keywords");
pub const FIELD_LANGUAGE: MetadataField = MetadataField::single("language");
pub const FIELD_PUBLICATION_TITLE: MetadataField = MetadataField::single("publication.title");
pub const FIELD_PUBLISHER: MetadataField = MetadataField::single("publisher");
pub const FIELD_START_PAGE: MetadataField = MetadataField::single("page.start");
pub const FIELD_VOLUME: MetadataField = MetadataField::single("volume");

// ---------------------------------------------------------------------------
// Canonical list rendering
// ---------------------------------------------------------------------------

/// Canonical textual form of an ordered value list: `[a, b, c]`, `[]` when empty.
pub fn render_list<S: AsRef<str>>(values: &[S]) -> String {
    let joined = values
        .iter()
        .map(|v| v.as_ref())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}

// ---------------------------------------------------------------------------
// MetadataTarget
// ---------------------------------------------------------------------------

/// The audience an extraction is performed for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataTarget {
    #[default]
    Any,
    Article,
    OpenUrl,
}

// ---------------------------------------------------------------------------
// MetadataRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
enum FieldValue {
    Single(String),
    Multi(Vec<String>),
}

/// One normalized metadata entry.
///
/// `cooked` holds values keyed by [`MetadataField`]; `raw` keeps whatever the
/// extractor pulled out of the source verbatim and is only used for dumps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetadataRecord {
    raw: BTreeMap<String, Vec<String>>,
    cooked: BTreeMap<&'static str, FieldValue>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value. Single-valued fields keep the latest value; multi-valued
    /// fields append in call order.
    pub fn put(&mut self, field: MetadataField, value: impl Into<String>) {
        let value = value.into();
        match field.kind() {
            FieldKind::SingleValued => {
                self.cooked.insert(field.key(), FieldValue::Single(value));
            }
            FieldKind::MultiValued => match self.cooked.get_mut(field.key()) {
                Some(FieldValue::Multi(values)) => values.push(value),
                _ => {
                    self.cooked.insert(field.key(), FieldValue::Multi(vec![value]));
                }
            },
        }
    }

    /// Builder-style [`put`](Self::put).
    pub fn with(mut self, field: MetadataField, value: impl Into<String>) -> Self {
        self.put(field, value);
        self
    }

    /// Record a raw source value under its source key.
    pub fn put_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.raw.entry(key.into()).or_default().push(value.into());
    }

    /// Scalar value of a single-valued field.
    pub fn get(&self, field: MetadataField) -> Option<&str> {
        self.scalar(field.key())
    }

    /// Ordered values of a multi-valued field; empty when nothing was stored.
    pub fn get_list(&self, field: MetadataField) -> &[String] {
        self.list(field.key())
    }

    pub fn get_raw(&self, key: &str) -> &[String] {
        self.raw.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.cooked.is_empty()
    }

    /// Number of cooked fields set on this record.
    pub fn len(&self) -> usize {
        self.cooked.len()
    }

    /// Indented, human-readable rendering of the raw and cooked maps.
    pub fn pretty(&self, indent: usize) -> String {
        let pad = " ".repeat(indent);
        let mut out = String::new();
        if !self.raw.is_empty() {
            out.push_str(&format!("{pad}raw:\n"));
            for (key, values) in &self.raw {
                out.push_str(&format!("{pad}{pad}{key}: {}\n", render_list(values)));
            }
        }
        out.push_str(&format!("{pad}cooked:\n"));
        for (key, value) in &self.cooked {
            let rendered = match value {
                FieldValue::Single(v) => v.clone(),
                FieldValue::Multi(vs) => render_list(vs),
            };
            out.push_str(&format!("{pad}{pad}{key}: {rendered}\n"));
        }
        out
    }

    fn scalar(&self, key: &str) -> Option<&str> {
        match self.cooked.get(key) {
            Some(FieldValue::Single(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    fn list(&self, key: &str) -> &[String] {
        match self.cooked.get(key) {
            Some(FieldValue::Multi(vs)) => vs.as_slice(),
            _ => &[],
        }
    }
}
