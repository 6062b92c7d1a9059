// In-memory content store. Stands in for the crawled-content repository an
// extractor normally reads from: URL → content bytes + content-type header.
//
// One store per harness, so nothing leaks between tests.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use bytes::Bytes;
use tracing::debug;

/// Header key the content type is recorded under.
pub const CONTENT_TYPE_HEADER: &str = "content-type";

/// How a staged item may be looked up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Retrieval {
    /// Versioned item: only a fetch for the exact URL returns it.
    #[default]
    Exact,
    /// Also answers fetches for any URL beneath it.
    Prefix,
}

/// A staged piece of content.
#[derive(Debug, Clone)]
pub struct ContentItem {
    url: String,
    content: Bytes,
    content_type: String,
    retrieval: Retrieval,
    headers: HashMap<String, String>,
}

impl ContentItem {
    fn new(url: String, content: Bytes, content_type: String, retrieval: Retrieval) -> Self {
        let mut headers = HashMap::new();
        headers.insert(CONTENT_TYPE_HEADER.to_string(), content_type.clone());
        Self {
            url,
            content,
            content_type,
            retrieval,
            headers,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Content as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn retrieval(&self) -> Retrieval {
        self.retrieval
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Attach an extra header (lower-cased key). Setting `content-type`
    /// also changes [`content_type`](Self::content_type).
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        if name == CONTENT_TYPE_HEADER {
            self.content_type = value.clone();
        }
        self.headers.insert(name, value);
    }
}

// ---------------------------------------------------------------------------
// ContentStore: the narrow capability extractors see
// ---------------------------------------------------------------------------

pub trait ContentStore {
    /// Register `content` at `url`. Re-staging a URL replaces the prior item.
    fn stage(
        &mut self,
        url: &str,
        content: Bytes,
        content_type: &str,
        retrieval: Retrieval,
    ) -> &mut ContentItem;

    /// Look up a staged item. Absence is a normal outcome.
    fn fetch(&self, url: &str) -> Option<&ContentItem>;
}

// ---------------------------------------------------------------------------
// MockContentStore
// ---------------------------------------------------------------------------

/// BTreeMap-based URL → item store. Never fails; unknown URLs yield `None`.
#[derive(Debug, Default)]
pub struct MockContentStore {
    items: BTreeMap<String, ContentItem>,
}

impl MockContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.fetch(url).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All staged URLs, sorted.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// Every item whose URL starts with `prefix`, sorted by URL.
    pub fn under<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a ContentItem> + 'a {
        self.items
            .range(prefix.to_string()..)
            .take_while(move |(url, _)| url.starts_with(prefix))
            .map(|(_, item)| item)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl ContentStore for MockContentStore {
    fn stage(
        &mut self,
        url: &str,
        content: Bytes,
        content_type: &str,
        retrieval: Retrieval,
    ) -> &mut ContentItem {
        debug!(
            url = %url,
            content_type = %content_type,
            size = content.len(),
            ?retrieval,
            "Staging content"
        );
        let item = ContentItem::new(
            url.to_string(),
            content,
            content_type.to_string(),
            retrieval,
        );
        match self.items.entry(url.to_string()) {
            // Last write wins.
            Entry::Occupied(mut slot) => {
                slot.insert(item);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(item),
        }
    }

    fn fetch(&self, url: &str) -> Option<&ContentItem> {
        if let Some(item) = self.items.get(url) {
            return Some(item);
        }
        self.items
            .values()
            .filter(|item| item.retrieval == Retrieval::Prefix && url.starts_with(&item.url))
            .max_by_key(|item| item.url.len())
    }
}
