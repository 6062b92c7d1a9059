//! Extraction harness: stage content, run the extractor under test, collect
//! records.
//!
//! Extraction failures are setup noise, not assertion failures: they are
//! logged and come back as [`ExtractOutcome::Failed`]. A test that expects
//! records must check the outcome itself.

use std::collections::BTreeMap;

use bytes::Bytes;
use tracing::{debug, warn};
use typed_builder::TypedBuilder;

use crate::config::HarnessConfig;
use crate::error::ExtractError;
use crate::extractor::{CachedContent, MetadataExtractor};
use crate::metadata::{MetadataRecord, MetadataTarget};
use crate::store::{ContentStore, MockContentStore, Retrieval};

/// URL the primary content is staged at when none is given.
pub const DEFAULT_CONTENT_URL: &str = "";
/// Content type of the primary content when none is given.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";
/// Content type of staged companion documents.
pub const AUX_CONTENT_TYPE: &str = "application/pdf";
/// Body of staged companion documents. Anything non-empty will do.
pub const AUX_PLACEHOLDER: &str = "    ";

/// One extraction run.
///
/// ```ignore
/// let request = ExtractRequest::builder()
///     .content(json)
///     .aux_urls(vec![format!("{base}2013/a.pdf")])
///     .build();
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct ExtractRequest {
    #[builder(default = DEFAULT_CONTENT_URL.to_string(), setter(into))]
    pub url: String,
    #[builder(default = DEFAULT_CONTENT_TYPE.to_string(), setter(into))]
    pub content_type: String,
    #[builder(setter(into))]
    pub content: String,
    #[builder(default)]
    pub aux_urls: Vec<String>,
}

/// What an extraction run produced.
#[derive(Debug)]
pub enum ExtractOutcome {
    Extracted(Vec<MetadataRecord>),
    Failed(ExtractError),
}

impl ExtractOutcome {
    /// Records produced; empty when extraction failed.
    pub fn records(&self) -> &[MetadataRecord] {
        match self {
            Self::Extracted(records) => records.as_slice(),
            Self::Failed(_) => &[],
        }
    }

    pub fn into_records(self) -> Vec<MetadataRecord> {
        match self {
            Self::Extracted(records) => records,
            Self::Failed(_) => Vec::new(),
        }
    }

    pub fn error(&self) -> Option<&ExtractError> {
        match self {
            Self::Extracted(_) => None,
            Self::Failed(e) => Some(e),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

/// Per-test fixture owning its configuration and content store.
#[derive(Debug, Default)]
pub struct ExtractionHarness {
    config: HarnessConfig,
    store: MockContentStore,
}

impl ExtractionHarness {
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            store: MockContentStore::new(),
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Base URL, for building content and companion URLs in tests.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn year(&self) -> &str {
        &self.config.year
    }

    pub fn unit_params(&self) -> BTreeMap<&'static str, &str> {
        self.config.unit_params()
    }

    pub fn store(&self) -> &MockContentStore {
        &self.store
    }

    /// Stage extra fixtures by hand before running an extraction.
    pub fn store_mut(&mut self) -> &mut MockContentStore {
        &mut self.store
    }

    /// Stage the request's content and companions, then run `extractor`
    /// against the primary item for [`MetadataTarget::Any`].
    pub fn run<E>(&mut self, request: ExtractRequest, extractor: &E) -> ExtractOutcome
    where
        E: MetadataExtractor + ?Sized,
    {
        let ExtractRequest {
            url,
            content_type,
            content,
            aux_urls,
        } = request;

        let primary = self
            .store
            .stage(&url, Bytes::from(content), &content_type, Retrieval::Exact)
            .clone();

        for aux_url in &aux_urls {
            self.store.stage(
                aux_url,
                Bytes::from_static(AUX_PLACEHOLDER.as_bytes()),
                AUX_CONTENT_TYPE,
                Retrieval::Exact,
            );
        }

        let cached = CachedContent::new(&primary, &self.store, &self.config);
        match extractor.extract(MetadataTarget::Any, &cached) {
            Ok(records) => {
                debug!(url = %url, records = records.len(), "Extraction complete");
                ExtractOutcome::Extracted(records)
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Extraction failed; returning no records");
                ExtractOutcome::Failed(e)
            }
        }
    }

    /// Content only, at the default URL and content type.
    pub fn extract<E>(&mut self, content: &str, extractor: &E) -> ExtractOutcome
    where
        E: MetadataExtractor + ?Sized,
    {
        self.run(ExtractRequest::builder().content(content).build(), extractor)
    }

    /// Content plus companion documents.
    pub fn extract_with_aux<E>(
        &mut self,
        content: &str,
        extractor: &E,
        aux_urls: &[String],
    ) -> ExtractOutcome
    where
        E: MetadataExtractor + ?Sized,
    {
        let request = ExtractRequest::builder()
            .content(content)
            .aux_urls(aux_urls.to_vec())
            .build();
        self.run(request, extractor)
    }

    /// Content at an explicit URL and content type.
    pub fn extract_at<E>(
        &mut self,
        url: &str,
        content_type: &str,
        content: &str,
        extractor: &E,
    ) -> ExtractOutcome
    where
        E: MetadataExtractor + ?Sized,
    {
        let request = ExtractRequest::builder()
            .url(url)
            .content_type(content_type)
            .content(content)
            .build();
        self.run(request, extractor)
    }

    /// Content at an explicit URL and content type, plus companion documents.
    pub fn extract_full<E>(
        &mut self,
        url: &str,
        content_type: &str,
        content: &str,
        extractor: &E,
        aux_urls: &[String],
    ) -> ExtractOutcome
    where
        E: MetadataExtractor + ?Sized,
    {
        let request = ExtractRequest::builder()
            .url(url)
            .content_type(content_type)
            .content(content)
            .aux_urls(aux_urls.to_vec())
            .build();
        self.run(request, extractor)
    }
}
