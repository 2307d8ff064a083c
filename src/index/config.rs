use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::core::ScreenerError;

/// Run-scoped configuration: which reference page lists each index, plus batch defaults.
///
/// Loaded once per run and handed to the resolver; nothing is read at import time.
///
/// ```yaml
/// index_mapping:
///   "^GSPC": "List of S&P 500 companies"
///   "^NDX": "Nasdaq-100"
/// threads: 8
/// fetch_timeout_secs: 20
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndexConfig {
    /// Index ticker to reference page title.
    #[serde(default = "default_mapping")]
    pub index_mapping: BTreeMap<String, String>,
    /// Concurrency limit used when the command line does not give one.
    #[serde(default)]
    pub threads: Option<usize>,
    /// Per-symbol fetch deadline used when the command line does not give one.
    #[serde(default)]
    pub fetch_timeout_secs: Option<u64>,
}

fn default_mapping() -> BTreeMap<String, String> {
    [
        ("^GSPC", "List of S&P 500 companies"),
        ("^IXIC", "Nasdaq-100"),
        ("^NDX", "Nasdaq-100"),
        ("^DJI", "Dow Jones Industrial Average"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            index_mapping: default_mapping(),
            threads: None,
            fetch_timeout_secs: None,
        }
    }
}

impl IndexConfig {
    /// Parses a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenerError::Config`] when the document is not valid configuration.
    pub fn from_yaml_str(s: &str) -> Result<Self, ScreenerError> {
        serde_yaml::from_str(s).map_err(|e| ScreenerError::Config(e.to_string()))
    }

    /// Reads and parses a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or [`ScreenerError::Config`]
    /// when it is not valid configuration.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScreenerError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Self::from_yaml_str(&text)
    }

    /// The reference page title for `ticker`, if mapped.
    #[must_use]
    pub fn page_title(&self, ticker: &str) -> Option<&str> {
        self.index_mapping.get(ticker).map(String::as_str)
    }

    #[must_use]
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }
}
