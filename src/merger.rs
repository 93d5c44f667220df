//! Rule merger: expands `RULE-SET` indirections into literal rules.

use serde::Serialize;
use std::collections::HashMap;

use crate::config::ClashConfig;
use crate::fetcher::{fetch_provider_lines, Fetch};
use crate::rule::{LocalRule, ProviderLine};

/// Counters collected while merging one config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    /// Literal local rules emitted unchanged
    pub passed_through: usize,
    /// Rules emitted from provider content
    pub expanded: usize,
    /// Local rules dropped (unknown type, empty, incomplete RULE-SET)
    pub dropped_local: usize,
    /// Provider lines dropped (unknown type)
    pub dropped_fetched: usize,
    /// RULE-SET rules whose provider is undefined or has no URL
    pub unresolved: usize,
    /// Provider downloads attempted
    pub fetches: usize,
    /// Provider downloads that failed
    pub failed_fetches: usize,
}

/// Result of merging one config.
#[derive(Debug, Clone, Default)]
pub struct MergeOutput {
    /// Final literal rules, in order
    pub rules: Vec<String>,
    pub stats: MergeStats,
}

/// Expands the rules of a Clash config into literal rule lines.
///
/// # Example
///
/// ```ignore
/// use k2merge::{ClashConfig, HttpFetcher, RuleMerger};
///
/// let merger = RuleMerger::new(HttpFetcher::new()?).with_url_prefix("https://ghproxy.example/");
/// let config = ClashConfig::from_yaml(&std::fs::read_to_string("clash.yaml")?)?;
/// let output = merger.merge(&config);
/// for rule in &output.rules {
///     println!("{}", rule);
/// }
/// ```
pub struct RuleMerger<F> {
    fetcher: F,
    url_prefix: String,
}

impl<F: Fetch> RuleMerger<F> {
    /// Create a merger that downloads providers through `fetcher`.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            url_prefix: String::new(),
        }
    }

    /// Prefix every provider URL (e.g. a mirror or GitHub proxy).
    pub fn with_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = prefix.into();
        self
    }

    /// Get the URL prefix.
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Merge all rules of `config`.
    ///
    /// Providers are fetched at most once per call; the cache is dropped when
    /// this returns.
    pub fn merge(&self, config: &ClashConfig) -> MergeOutput {
        let mut cache: HashMap<String, Vec<String>> = HashMap::new();
        let mut output = MergeOutput::default();

        for raw in config.rules() {
            match LocalRule::parse(raw) {
                Ok(LocalRule::Literal(line)) => {
                    output.rules.push(line);
                    output.stats.passed_through += 1;
                }
                Ok(LocalRule::RuleSet { provider, policy }) => {
                    let Some(definition) = config.provider(&provider) else {
                        log::warn!("Rule provider not defined: {}", provider);
                        output.stats.unresolved += 1;
                        continue;
                    };
                    let Some(url) = definition.url() else {
                        log::warn!("Rule provider has no URL: {}", provider);
                        output.stats.unresolved += 1;
                        continue;
                    };

                    if !cache.contains_key(&provider) {
                        let lines = self.fetch(url, &mut output.stats);
                        cache.insert(provider.clone(), lines);
                    }
                    let lines = cache.get(&provider).map(Vec::as_slice).unwrap_or_default();

                    expand_provider(lines, &policy, &mut output);
                }
                Err(e) => {
                    log::warn!("Skipping rule {:?}: {}", raw, e);
                    output.stats.dropped_local += 1;
                }
            }
        }

        output
    }

    fn fetch(&self, url: &str, stats: &mut MergeStats) -> Vec<String> {
        let full_url = format!("{}{}", self.url_prefix, url);
        stats.fetches += 1;
        fetch_provider_lines(&self.fetcher, &full_url).unwrap_or_else(|| {
            stats.failed_fetches += 1;
            Vec::new()
        })
    }
}

fn expand_provider(lines: &[String], policy: &str, output: &mut MergeOutput) {
    for line in lines {
        match ProviderLine::parse(line) {
            Some(parsed) => {
                output.rules.push(parsed.with_policy(policy));
                output.stats.expanded += 1;
            }
            None => {
                log::debug!("Dropping provider line: {}", line);
                output.stats.dropped_fetched += 1;
            }
        }
    }
}
