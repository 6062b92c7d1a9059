// The seam between the harness and the code under test.
//
// An extractor receives a CachedContent view: the primary staged item plus
// read access to the rest of the store (for companion files) and to the
// harness configuration. It never sees the harness itself.

use crate::config::HarnessConfig;
use crate::error::ExtractResult;
use crate::metadata::{MetadataRecord, MetadataTarget};
use crate::store::{ContentItem, ContentStore, MockContentStore};

/// A metadata extractor under test.
pub trait MetadataExtractor {
    fn extract(
        &self,
        target: MetadataTarget,
        content: &CachedContent<'_>,
    ) -> ExtractResult<Vec<MetadataRecord>>;
}

impl<E: MetadataExtractor + ?Sized> MetadataExtractor for &E {
    fn extract(
        &self,
        target: MetadataTarget,
        content: &CachedContent<'_>,
    ) -> ExtractResult<Vec<MetadataRecord>> {
        (**self).extract(target, content)
    }
}

impl<E: MetadataExtractor + ?Sized> MetadataExtractor for Box<E> {
    fn extract(
        &self,
        target: MetadataTarget,
        content: &CachedContent<'_>,
    ) -> ExtractResult<Vec<MetadataRecord>> {
        (**self).extract(target, content)
    }
}

/// What an extractor is pointed at.
#[derive(Debug, Clone, Copy)]
pub struct CachedContent<'a> {
    item: &'a ContentItem,
    store: &'a MockContentStore,
    config: &'a HarnessConfig,
}

impl<'a> CachedContent<'a> {
    pub fn new(
        item: &'a ContentItem,
        store: &'a MockContentStore,
        config: &'a HarnessConfig,
    ) -> Self {
        Self {
            item,
            store,
            config,
        }
    }

    pub fn item(&self) -> &'a ContentItem {
        self.item
    }

    pub fn url(&self) -> &'a str {
        self.item.url()
    }

    pub fn content_type(&self) -> &'a str {
        self.item.content_type()
    }

    pub fn text(&self) -> String {
        self.item.text()
    }

    /// Look up a companion item (e.g. the PDF a record points at).
    pub fn sibling(&self, url: &str) -> Option<&'a ContentItem> {
        self.store.fetch(url)
    }

    pub fn store(&self) -> &'a MockContentStore {
        self.store
    }

    pub fn config(&self) -> &'a HarnessConfig {
        self.config
    }
}
