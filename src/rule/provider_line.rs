//! Lines fetched from rule providers.

use crate::RuleType;

use super::{split_fields, strip_quotes, NO_RESOLVE};

/// A validated provider line, waiting for a policy group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderLine {
    /// All fields except `no-resolve`, joined with commas
    pub base: String,
    /// Whether `no-resolve` appeared among the fields
    pub no_resolve: bool,
}

impl ProviderLine {
    /// Parse a provider line.
    ///
    /// Returns `None` when the first field is not a supported rule type.
    pub fn parse(line: &str) -> Option<Self> {
        let line = strip_quotes(line);
        let fields: Vec<&str> = split_fields(&line)
            .into_iter()
            .filter(|f| !f.is_empty())
            .collect();

        RuleType::parse(fields.first()?)?;
        let no_resolve = fields.contains(&NO_RESOLVE);
        let base = fields
            .into_iter()
            .filter(|f| *f != NO_RESOLVE)
            .collect::<Vec<_>>()
            .join(",");

        Some(Self { base, no_resolve })
    }

    /// Render the final rule with the policy group attached.
    ///
    /// `no-resolve` always trails the policy group.
    pub fn with_policy(&self, policy: &str) -> String {
        if self.no_resolve {
            format!("{},{},{}", self.base, policy, NO_RESOLVE)
        } else {
            format!("{},{}", self.base, policy)
        }
    }
}
