// Canned extractors for exercising the harness itself.
//
// - StaticExtractor: returns a fixed record list, remembers every call
// - FailingExtractor: always fails with a preset error class

use std::sync::Mutex;

use crate::error::{ExtractError, ExtractResult};
use crate::extractor::{CachedContent, MetadataExtractor};
use crate::metadata::{MetadataRecord, MetadataTarget};

// ---------------------------------------------------------------------------
// StaticExtractor
// ---------------------------------------------------------------------------

/// What a [`StaticExtractor`] was asked to extract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractCall {
    pub target: MetadataTarget,
    pub url: String,
    pub content_type: String,
    pub text: String,
}

/// Returns the same records for any content.
pub struct StaticExtractor {
    records: Vec<MetadataRecord>,
    calls: Mutex<Vec<ExtractCall>>,
}

impl StaticExtractor {
    pub fn new(records: Vec<MetadataRecord>) -> Self {
        Self {
            records,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<ExtractCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl MetadataExtractor for StaticExtractor {
    fn extract(
        &self,
        target: MetadataTarget,
        content: &CachedContent<'_>,
    ) -> ExtractResult<Vec<MetadataRecord>> {
        self.calls.lock().unwrap().push(ExtractCall {
            target,
            url: content.url().to_string(),
            content_type: content.content_type().to_string(),
            text: content.text(),
        });
        Ok(self.records.clone())
    }
}

// ---------------------------------------------------------------------------
// FailingExtractor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureClass {
    Io,
    Plugin,
}

/// Fails every extraction.
pub struct FailingExtractor {
    class: FailureClass,
    message: String,
}

impl FailingExtractor {
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            class: FailureClass::Io,
            message: message.into(),
        }
    }

    pub fn plugin(message: impl Into<String>) -> Self {
        Self {
            class: FailureClass::Plugin,
            message: message.into(),
        }
    }
}

impl MetadataExtractor for FailingExtractor {
    fn extract(
        &self,
        _target: MetadataTarget,
        _content: &CachedContent<'_>,
    ) -> ExtractResult<Vec<MetadataRecord>> {
        Err(match self.class {
            FailureClass::Io => ExtractError::Io(std::io::Error::other(self.message.clone())),
            FailureClass::Plugin => ExtractError::plugin(self.message.clone()),
        })
    }
}
