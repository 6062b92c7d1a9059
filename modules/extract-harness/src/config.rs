use std::collections::BTreeMap;

pub const DEFAULT_PLUGIN_NAME: &str = "clockss-source-plugin";
pub const DEFAULT_BASE_URL: &str = "http://www.source.org/";
pub const DEFAULT_YEAR: &str = "2013";

/// Plugin parameters handed through to the extractor under test.
/// The values are opaque to the harness; extractors read them back via
/// [`CachedContent::config`](crate::extractor::CachedContent::config).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub plugin_name: String,
    pub base_url: String,
    pub year: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            plugin_name: DEFAULT_PLUGIN_NAME.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            year: DEFAULT_YEAR.to_string(),
        }
    }
}

impl HarnessConfig {
    pub fn new(
        plugin_name: impl Into<String>,
        base_url: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            plugin_name: plugin_name.into(),
            base_url: base_url.into(),
            year: year.into(),
        }
    }

    /// Load overrides from the environment (and `.env` if present).
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let config = Self {
            plugin_name: std::env::var("EXTRACT_HARNESS_PLUGIN").unwrap_or(defaults.plugin_name),
            base_url: std::env::var("EXTRACT_HARNESS_BASE_URL").unwrap_or(defaults.base_url),
            year: std::env::var("EXTRACT_HARNESS_YEAR").unwrap_or(defaults.year),
        };

        config.log_summary();
        config
    }

    /// The per-unit parameter map extractors see: `base_url` and `year`.
    pub fn unit_params(&self) -> BTreeMap<&'static str, &str> {
        BTreeMap::from([("base_url", self.base_url.as_str()), ("year", self.year.as_str())])
    }

    pub fn log_summary(&self) {
        tracing::info!("Harness config:");
        tracing::info!("  plugin: {}", self.plugin_name);
        tracing::info!("  base_url: {}", self.base_url);
        tracing::info!("  year: {}", self.year);
    }
}
