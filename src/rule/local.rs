//! Entries of the config's own `rules:` list.

use crate::error::LocalRuleError;
use crate::RuleType;

use super::{split_fields, strip_quotes};

/// A validated entry of the config's `rules:` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalRule {
    /// A literal rule, emitted as-is (quotes removed).
    Literal(String),
    /// `RULE-SET,<provider>,<policy>`; any further fields are ignored.
    RuleSet { provider: String, policy: String },
}

impl LocalRule {
    /// Parse and validate a configured rule string.
    pub fn parse(raw: &str) -> Result<Self, LocalRuleError> {
        let line = strip_quotes(raw);
        let fields = split_fields(&line);

        let first = fields.first().copied().unwrap_or_default();
        if first.is_empty() {
            return Err(LocalRuleError::Empty);
        }

        let rule_type =
            RuleType::parse(first).ok_or_else(|| LocalRuleError::UnknownType(first.to_string()))?;

        if !rule_type.is_rule_set() {
            return Ok(LocalRule::Literal(line));
        }

        match fields.as_slice() {
            [_, provider, policy, ..] if !provider.is_empty() && !policy.is_empty() => {
                Ok(LocalRule::RuleSet {
                    provider: provider.to_string(),
                    policy: policy.to_string(),
                })
            }
            _ => Err(LocalRuleError::IncompleteRuleSet(line.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_passes_through_verbatim() {
        let rule = LocalRule::parse("DOMAIN-SUFFIX, google.com ,Proxy").unwrap();
        assert_eq!(
            rule,
            LocalRule::Literal("DOMAIN-SUFFIX, google.com ,Proxy".to_string())
        );
    }

    #[test]
    fn test_literal_strips_quotes_only() {
        let rule = LocalRule::parse("'MATCH','DIRECT'").unwrap();
        assert_eq!(rule, LocalRule::Literal("MATCH,DIRECT".to_string()));
    }

    #[test]
    fn test_lowercase_type_is_accepted() {
        let rule = LocalRule::parse("geoip,CN,DIRECT").unwrap();
        assert_eq!(rule, LocalRule::Literal("geoip,CN,DIRECT".to_string()));
    }

    #[test]
    fn test_rule_set() {
        let rule = LocalRule::parse("RULE-SET, ads ,Reject").unwrap();
        assert_eq!(
            rule,
            LocalRule::RuleSet {
                provider: "ads".to_string(),
                policy: "Reject".to_string(),
            }
        );
    }

    #[test]
    fn test_rule_set_extra_fields_ignored() {
        let rule = LocalRule::parse("rule-set,cncidr,DIRECT,no-resolve").unwrap();
        assert_eq!(
            rule,
            LocalRule::RuleSet {
                provider: "cncidr".to_string(),
                policy: "DIRECT".to_string(),
            }
        );
    }

    #[test]
    fn test_incomplete_rule_set() {
        assert_eq!(
            LocalRule::parse("RULE-SET,ads"),
            Err(LocalRuleError::IncompleteRuleSet("RULE-SET,ads".to_string()))
        );
        assert!(matches!(
            LocalRule::parse("RULE-SET,,Proxy"),
            Err(LocalRuleError::IncompleteRuleSet(_))
        ));
    }

    #[test]
    fn test_unknown_and_empty() {
        assert_eq!(
            LocalRule::parse("USER-AGENT,foo*,Proxy"),
            Err(LocalRuleError::UnknownType("USER-AGENT".to_string()))
        );
        assert_eq!(LocalRule::parse(""), Err(LocalRuleError::Empty));
        assert_eq!(LocalRule::parse("  ''  "), Err(LocalRuleError::Empty));
    }
}
