//! Rule line parsing and normalization.
//!
//! Two kinds of lines flow through the merger:
//!
//! - [`LocalRule`]: an entry of the config's own `rules:` list, either a literal
//!   rule passed through verbatim or a `RULE-SET` indirection.
//! - [`ProviderLine`]: a line fetched from a rule provider, which lacks a policy
//!   group and may carry a `no-resolve` modifier anywhere among its fields.

mod local;
mod provider_line;

pub use local::LocalRule;
pub use provider_line::ProviderLine;

/// Modifier telling the proxy engine to skip DNS resolution for IP rules.
pub const NO_RESOLVE: &str = "no-resolve";

/// Remove every `'` and `"` from a rule string.
pub fn strip_quotes(s: &str) -> String {
    s.chars().filter(|c| !matches!(c, '\'' | '"')).collect()
}

/// Split a rule string on commas, trimming each field.
pub fn split_fields(s: &str) -> Vec<&str> {
    s.split(',').map(str::trim).collect()
}
