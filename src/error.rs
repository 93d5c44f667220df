//! Error types for k2merge.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for k2merge operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Download error
    #[error("download error: {0}")]
    Download(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Response body could not be decoded into text
    #[error("decode error: {0}")]
    Decode(String),

    /// Input file does not exist
    #[error("file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for k2merge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reason a configured rule was dropped before merging.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocalRuleError {
    /// Nothing left after quote stripping and trimming
    #[error("empty rule")]
    Empty,

    /// First field is not a known rule type
    #[error("unsupported rule type: {0}")]
    UnknownType(String),

    /// RULE-SET without provider name or policy group
    #[error("RULE-SET needs a provider and a policy group: {0}")]
    IncompleteRuleSet(String),
}
