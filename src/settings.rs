//! Run settings: which files to process and how to reach providers.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetcher::HttpFetcher;
use crate::merger::RuleMerger;
use crate::{Error, Result};

/// Settings for a merge run, loadable from a YAML file.
///
/// ```yaml
/// files:
///   - clashstga.yaml
/// url_prefix: "https://ghproxy.example/"
/// timeout_secs: 15
/// user_agent: clash.meta
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Config files to process, in order
    pub files: Vec<PathBuf>,
    /// Prepended to every provider URL
    pub url_prefix: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// User-Agent header for provider downloads
    pub user_agent: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            files: vec![PathBuf::from("clashstga.yaml")],
            url_prefix: String::new(),
            timeout_secs: 15,
            user_agent: None,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// Parse settings from YAML. Missing fields take their defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        let settings: Self = if value.is_null() {
            Self::default()
        } else {
            serde_yaml::from_value(value)?
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build an HTTP merger from these settings.
    pub fn merger(&self) -> Result<RuleMerger<HttpFetcher>> {
        self.validate()?;
        let fetcher = HttpFetcher::with_options(self.timeout(), self.user_agent.as_deref())?;
        Ok(RuleMerger::new(fetcher).with_url_prefix(self.url_prefix.clone()))
    }
}
