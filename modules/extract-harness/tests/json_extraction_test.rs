//! End-to-end fixture tests.
//!
//! Template → `fill_*` → `ExtractionHarness` → `assert_*`, driven through a
//! small JSON source extractor defined here. The extractor emits one record
//! per source entry whose PDF is present in the store, the way source
//! extractors usually validate against delivered content.

use extract_harness::fixtures::{content_from_file, fixture_path};
use extract_harness::logging::init_test_logging;
use extract_harness::metadata::{
    FIELD_ACCESS_URL, FIELD_ARTICLE_TITLE, FIELD_AUTHOR, FIELD_DOI, FIELD_ISSN, FIELD_KEYWORDS,
    FIELD_PUBLICATION_TITLE, FIELD_PUBLISHER, FIELD_VOLUME,
};
use extract_harness::{
    assert_single_record_fields, dump_records, fill_all, fill_sequentially, verify_fields,
    verify_single_record_fields, CachedContent, ContentStore, ExpectedFields, ExtractError,
    ExtractRequest, ExtractResult, ExtractionHarness, HarnessConfig, MetadataExtractor,
    MetadataRecord, MetadataTarget, Retrieval,
};
use regex::Regex;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// JSON source extractor under test
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SourceDoc {
    publisher: Option<String>,
    journal: Journal,
    #[serde(default)]
    records: Vec<SourceRecord>,
}

#[derive(Debug, Deserialize)]
struct Journal {
    title: String,
    issn: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SourceRecord {
    doi: String,
    title: String,
    #[serde(default)]
    authors: Vec<String>,
    #[serde(default)]
    keywords: Vec<String>,
    volume: Option<String>,
    pdf: String,
}

struct JsonSourceExtractor;

impl MetadataExtractor for JsonSourceExtractor {
    fn extract(
        &self,
        _target: MetadataTarget,
        content: &CachedContent<'_>,
    ) -> ExtractResult<Vec<MetadataRecord>> {
        let base_url = &content.config().base_url;
        if base_url.is_empty() {
            return Err(ExtractError::MissingConfig {
                key: "base_url".into(),
            });
        }

        let doc: SourceDoc = serde_json::from_str(&content.text())
            .map_err(|e| ExtractError::malformed(content.url(), e))?;

        let mut out = Vec::new();
        for entry in doc.records {
            let pdf_url = format!("{base_url}{}", entry.pdf);
            let Some(pdf) = content.sibling(&pdf_url) else {
                continue;
            };
            if pdf.content_type() != "application/pdf" {
                continue;
            }

            let mut md = MetadataRecord::new()
                .with(FIELD_DOI, entry.doi.as_str())
                .with(FIELD_ARTICLE_TITLE, entry.title.as_str())
                .with(FIELD_PUBLICATION_TITLE, doc.journal.title.as_str())
                .with(FIELD_ACCESS_URL, pdf_url.as_str());
            md.put_raw("doi", entry.doi.as_str());
            for author in &entry.authors {
                md.put(FIELD_AUTHOR, author.as_str());
            }
            for keyword in &entry.keywords {
                md.put(FIELD_KEYWORDS, keyword.as_str());
            }
            if let Some(volume) = &entry.volume {
                md.put(FIELD_VOLUME, volume.as_str());
            }
            if let Some(issn) = &doc.journal.issn {
                md.put(FIELD_ISSN, issn.as_str());
            }
            if let Some(publisher) = &doc.publisher {
                md.put(FIELD_PUBLISHER, publisher.as_str());
            }
            out.push(md);
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn placeholder(name: &str) -> Regex {
    Regex::new(&format!(r"\{{\{{{name}\}}\}}")).unwrap()
}

/// The fixture template with DOIs, ISSN, volume and year filled in.
fn filled_fixture(harness: &ExtractionHarness, dois: &[&str]) -> String {
    let template = content_from_file(fixture_path("source_records.json")).unwrap();
    let content = fill_sequentially(&template, &placeholder("DOI"), dois);
    let content = fill_all(&content, &placeholder("ISSN"), "1234-5678");
    let content = fill_all(&content, &placeholder("VOLUME"), "7");
    fill_all(&content, &placeholder("YEAR"), harness.year())
}

fn pdf_urls(harness: &ExtractionHarness, names: &[&str]) -> Vec<String> {
    names
        .iter()
        .map(|name| format!("{}{}/{name}", harness.base_url(), harness.year()))
        .collect()
}

fn by_title<'a>(records: &'a [MetadataRecord], title: &str) -> &'a MetadataRecord {
    records
        .iter()
        .find(|md| md.get(FIELD_ARTICLE_TITLE) == Some(title))
        .unwrap_or_else(|| panic!("no record titled {title:?}\n{}", dump_records(records)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn extracts_every_record_with_a_pdf() {
    init_test_logging();
    let mut harness = ExtractionHarness::default();
    let content = filled_fixture(&harness, &["10.1000/first", "10.1000/second"]);
    let pdfs = pdf_urls(&harness, &["first.pdf", "second.pdf"]);

    let outcome = harness.extract_with_aux(&content, &JsonSourceExtractor, &pdfs);

    assert!(!outcome.is_failed(), "{:?}", outcome.error());
    let records = outcome.records();
    assert_eq!(records.len(), 2);

    let first = ExpectedFields::new()
        .with(FIELD_DOI, "10.1000/first")
        .with(FIELD_AUTHOR, "[Doe, Jane, Roe, Rick]")
        .with(FIELD_KEYWORDS, "[metadata, extraction]")
        .with(FIELD_ISSN, "1234-5678")
        .with(FIELD_VOLUME, "7")
        .with(FIELD_PUBLISHER, "Source Press")
        .with(FIELD_PUBLICATION_TITLE, "Journal of Fixtures")
        .with(FIELD_ACCESS_URL, "http://www.source.org/2013/first.pdf");
    verify_fields(by_title(records, "First Article"), &first).unwrap();

    let second = ExpectedFields::new()
        .with(FIELD_DOI, "10.1000/second")
        .with(FIELD_AUTHOR, "[Poe, Edgar]")
        .with(FIELD_KEYWORDS, "[]");
    verify_fields(by_title(records, "Second Article"), &second).unwrap();
}

#[test]
fn records_without_staged_pdf_are_skipped() {
    init_test_logging();
    let mut harness = ExtractionHarness::default();
    let content = filled_fixture(&harness, &["10.1000/first", "10.1000/second"]);
    let pdfs = pdf_urls(&harness, &["second.pdf"]);

    let outcome = harness.extract_with_aux(&content, &JsonSourceExtractor, &pdfs);

    assert_single_record_fields(
        outcome.records(),
        &ExpectedFields::from([
            (FIELD_DOI, "10.1000/second"),
            (FIELD_ARTICLE_TITLE, "Second Article"),
        ]),
    );
}

#[test]
fn unfilled_placeholders_pass_through_to_extractor() {
    let mut harness = ExtractionHarness::default();
    // Only one DOI supplied: the second record keeps its placeholder.
    let content = filled_fixture(&harness, &["10.1000/only"]);
    let pdfs = pdf_urls(&harness, &["first.pdf", "second.pdf"]);

    let outcome = harness.extract_with_aux(&content, &JsonSourceExtractor, &pdfs);

    let records = outcome.records();
    assert_eq!(by_title(records, "First Article").get(FIELD_DOI), Some("10.1000/only"));
    assert_eq!(by_title(records, "Second Article").get(FIELD_DOI), Some("{{DOI}}"));
}

#[test]
fn custom_config_flows_to_extractor() {
    let mut harness =
        ExtractionHarness::new(HarnessConfig::new("p", "https://mirror.example/", "2021"));
    let content = filled_fixture(&harness, &["10.1/a", "10.1/b"]);
    let request = ExtractRequest::builder()
        .url("https://mirror.example/2021/records.json")
        .content(content)
        .aux_urls(pdf_urls(&harness, &["first.pdf"]))
        .build();

    let outcome = harness.run(request, &JsonSourceExtractor);

    assert_single_record_fields(
        outcome.records(),
        &ExpectedFields::from([(FIELD_ACCESS_URL, "https://mirror.example/2021/first.pdf")]),
    );
}

#[test]
fn pdf_with_wrong_content_type_is_not_a_pdf() {
    let mut harness = ExtractionHarness::default();
    let content = filled_fixture(&harness, &["10.1/a", "10.1/b"]);
    let url = format!("{}{}/first.pdf", harness.base_url(), harness.year());
    harness
        .store_mut()
        .stage(&url, "<html/>".into(), "text/html", Retrieval::Exact);

    let outcome = harness.extract(&content, &JsonSourceExtractor);

    assert!(!outcome.is_failed());
    assert!(outcome.records().is_empty());
}

#[test]
fn malformed_json_is_absorbed_as_io_failure() {
    init_test_logging();
    let mut harness = ExtractionHarness::default();

    let outcome = harness.extract("{\"records\": [", &JsonSourceExtractor);

    assert!(outcome.is_failed());
    assert!(outcome.error().unwrap().is_io());
    assert_eq!(outcome.records().len(), 0);
}

#[test]
fn missing_base_url_is_absorbed_as_plugin_failure() {
    let mut harness = ExtractionHarness::new(HarnessConfig::new("p", "", "2013"));

    let outcome = harness.extract("{}", &JsonSourceExtractor);

    assert!(outcome.error().unwrap().is_plugin());
    assert!(verify_single_record_fields(outcome.records(), &ExpectedFields::new()).is_err());
}
