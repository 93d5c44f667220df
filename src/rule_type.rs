//! Rule type definitions.

use std::fmt;

/// RuleType is the closed set of rule types the merged config may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType {
    Domain,
    DomainSuffix,
    DomainKeyword,
    DomainRegex,
    Geosite,
    IpCidr,
    IpCidr6,
    IpSuffix,
    IpAsn,
    GeoIp,
    SrcGeoIp,
    SrcIpAsn,
    SrcIpCidr,
    SrcIpSuffix,
    DstPort,
    SrcPort,
    InPort,
    InType,
    InUser,
    InName,
    ProcessPath,
    ProcessPathRegex,
    ProcessName,
    ProcessNameRegex,
    Uid,
    Network,
    Dscp,
    /// Logical AND of sub-rules
    And,
    /// Logical OR of sub-rules
    Or,
    /// Logical NOT of a sub-rule
    Not,
    /// Indirection into a rule provider
    RuleSet,
    /// Catch-all
    Match,
}

impl RuleType {
    /// Every supported rule type, in canonical order.
    pub const ALL: [RuleType; 32] = [
        RuleType::Domain,
        RuleType::DomainSuffix,
        RuleType::DomainKeyword,
        RuleType::DomainRegex,
        RuleType::Geosite,
        RuleType::IpCidr,
        RuleType::IpCidr6,
        RuleType::IpSuffix,
        RuleType::IpAsn,
        RuleType::GeoIp,
        RuleType::SrcGeoIp,
        RuleType::SrcIpAsn,
        RuleType::SrcIpCidr,
        RuleType::SrcIpSuffix,
        RuleType::DstPort,
        RuleType::SrcPort,
        RuleType::InPort,
        RuleType::InType,
        RuleType::InUser,
        RuleType::InName,
        RuleType::ProcessPath,
        RuleType::ProcessPathRegex,
        RuleType::ProcessName,
        RuleType::ProcessNameRegex,
        RuleType::Uid,
        RuleType::Network,
        RuleType::Dscp,
        RuleType::And,
        RuleType::Or,
        RuleType::Not,
        RuleType::RuleSet,
        RuleType::Match,
    ];

    /// Parse a rule type from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let upper = s.trim().to_uppercase();
        Self::ALL.into_iter().find(|t| t.as_str() == upper)
    }

    /// Get the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::Domain => "DOMAIN",
            RuleType::DomainSuffix => "DOMAIN-SUFFIX",
            RuleType::DomainKeyword => "DOMAIN-KEYWORD",
            RuleType::DomainRegex => "DOMAIN-REGEX",
            RuleType::Geosite => "GEOSITE",
            RuleType::IpCidr => "IP-CIDR",
            RuleType::IpCidr6 => "IP-CIDR6",
            RuleType::IpSuffix => "IP-SUFFIX",
            RuleType::IpAsn => "IP-ASN",
            RuleType::GeoIp => "GEOIP",
            RuleType::SrcGeoIp => "SRC-GEOIP",
            RuleType::SrcIpAsn => "SRC-IP-ASN",
            RuleType::SrcIpCidr => "SRC-IP-CIDR",
            RuleType::SrcIpSuffix => "SRC-IP-SUFFIX",
            RuleType::DstPort => "DST-PORT",
            RuleType::SrcPort => "SRC-PORT",
            RuleType::InPort => "IN-PORT",
            RuleType::InType => "IN-TYPE",
            RuleType::InUser => "IN-USER",
            RuleType::InName => "IN-NAME",
            RuleType::ProcessPath => "PROCESS-PATH",
            RuleType::ProcessPathRegex => "PROCESS-PATH-REGEX",
            RuleType::ProcessName => "PROCESS-NAME",
            RuleType::ProcessNameRegex => "PROCESS-NAME-REGEX",
            RuleType::Uid => "UID",
            RuleType::Network => "NETWORK",
            RuleType::Dscp => "DSCP",
            RuleType::And => "AND",
            RuleType::Or => "OR",
            RuleType::Not => "NOT",
            RuleType::RuleSet => "RULE-SET",
            RuleType::Match => "MATCH",
        }
    }

    /// Whether this type is the provider indirection marker.
    pub fn is_rule_set(&self) -> bool {
        matches!(self, RuleType::RuleSet)
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
