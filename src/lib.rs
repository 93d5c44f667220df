//! K2Merge - inline Clash rule providers into literal rules.
//!
//! Some Clash-compatible clients cannot load remote `rule-providers`. This
//! crate rewrites a config so every `RULE-SET,<provider>,<policy>` entry is
//! replaced by the provider's rules, each with the policy group attached.
//!
//! # Features
//!
//! - **Whitelist validation**: only known rule types reach the output
//! - **`no-resolve` handling**: the modifier always trails the policy group
//! - **Single fetch per provider**: providers referenced many times are downloaded once per file
//! - **Header preservation**: everything before `rule-providers:`/`rules:` is kept byte-for-byte
//! - **Best effort**: failed downloads and bad rules are logged and skipped, never fatal
//!
//! # Quick Start
//!
//! ```ignore
//! use k2merge::{process_files, Settings};
//!
//! let settings = Settings::default();
//! let merger = settings.merger()?;
//!
//! // Writes clashstga_merge.yaml next to clashstga.yaml
//! let report = process_files(&merger, &settings.files);
//! ```
//!
//! # Merge Rules
//!
//! Given a provider `ads` serving:
//!
//! ```text
//! DOMAIN-SUFFIX,example.com
//! USER-AGENT,foo
//! IP-CIDR,1.2.3.0/24,no-resolve
//! ```
//!
//! the rule `RULE-SET,ads,Reject` expands to:
//!
//! ```text
//! DOMAIN-SUFFIX,example.com,Reject
//! IP-CIDR,1.2.3.0/24,Reject,no-resolve
//! ```

mod error;
mod rule_type;

pub mod config;
pub mod fetcher;
pub mod merger;
pub mod output;
pub mod processor;
pub mod report;
pub mod rule;
pub mod settings;

// Re-export core types
pub use error::{Error, LocalRuleError, Result};
pub use rule_type::RuleType;

pub use config::{ClashConfig, RuleProvider};
pub use fetcher::{Fetch, HttpFetcher};
pub use merger::{MergeOutput, MergeStats, RuleMerger};
pub use processor::{merge_document, process_file, process_files, FileOutcome, MergedDocument};
pub use report::{FileReport, FileStatus, RunReport};
pub use settings::Settings;
