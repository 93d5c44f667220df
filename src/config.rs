//! Clash configuration model.
//!
//! Only the `rule-providers` and `rules` sections are read; everything else in
//! the document is opaque and preserved byte-for-byte by the output writer.

use serde::Deserialize;
use std::collections::HashMap;

use crate::Result;

/// Clash configuration structure.
#[derive(Debug, Default, Deserialize)]
pub struct ClashConfig {
    /// Rule list
    #[serde(default)]
    rules: Option<Vec<String>>,
    /// Rule providers
    #[serde(rename = "rule-providers", default)]
    rule_providers: Option<HashMap<String, RuleProvider>>,
}

impl ClashConfig {
    /// Parse a Clash YAML document.
    ///
    /// An empty document (or a bare `null`) yields an empty config.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_value(value)?)
    }

    /// Configured rules, in order.
    pub fn rules(&self) -> &[String] {
        self.rules.as_deref().unwrap_or_default()
    }

    /// Look up a provider definition by name.
    pub fn provider(&self, name: &str) -> Option<&RuleProvider> {
        self.rule_providers.as_ref()?.get(name)
    }

    /// Number of provider definitions.
    pub fn provider_count(&self) -> usize {
        self.rule_providers.as_ref().map_or(0, HashMap::len)
    }

    /// Whether both sections needed for merging are present and non-empty.
    pub fn is_mergeable(&self) -> bool {
        !self.rules().is_empty() && self.provider_count() > 0
    }
}

/// Clash rule provider configuration.
///
/// Only `url` is read. Other keys (`type`, `behavior`, `path`, `interval`,
/// ...) are accepted in any shape and ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleProvider {
    /// URL for HTTP providers
    #[serde(default)]
    pub url: Option<String>,
}

impl RuleProvider {
    /// Source URL, if one is set and non-blank.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}
