//! Fixtures for unit-testing metadata extractors.
//!
//! Fill a content template, stage it in an in-memory content store, run the
//! extractor under test against it, and check the records it produced:
//!
//! ```ignore
//! let json = fill_sequentially(TEMPLATE, &doi_pattern, &["10.1/a"]);
//! let mut harness = ExtractionHarness::default();
//! let outcome = harness.extract(&json, &MyJsonExtractor);
//! assert_single_record_fields(outcome.records(), &ExpectedFields::from([(FIELD_DOI, "10.1/a")]));
//! ```

pub mod asserts;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fixtures;
pub mod harness;
pub mod logging;
pub mod metadata;
pub mod store;
pub mod template;
pub mod testing;

pub use asserts::{
    assert_field, assert_fields, assert_single_record, assert_single_record_fields,
    dump_record, dump_records, verify_field, verify_fields, verify_single_record,
    verify_single_record_fields, ExpectedFields,
};
pub use config::HarnessConfig;
pub use error::{AssertionFailure, ExtractError, ExtractResult};
pub use extractor::{CachedContent, MetadataExtractor};
pub use harness::{ExtractOutcome, ExtractRequest, ExtractionHarness};
pub use metadata::{render_list, FieldKind, MetadataField, MetadataRecord, MetadataTarget};
pub use store::{ContentItem, ContentStore, MockContentStore, Retrieval};
pub use template::{count_matches, fill_all, fill_sequentially};
