use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Directory fixture files live in: `tests/fixtures` under the crate root.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Path of a named fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Read a fixture (or template) file as text.
pub fn content_from_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixture file: {}", path.display()))
}
