use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::Deserialize;

/// Match semantics of a rule line, taken from its leading field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Domain,
    DomainSuffix,
    DomainKeyword,
    DomainSet,
    IpCidr,
    IpCidr6,
    IpAsn,
    GeoIp,
    UserAgent,
    UrlRegex,
    ProcessName,
    DstPort,
    Other(String),
}

static RULE_KIND_PREFIXES: Lazy<HashMap<&'static str, RuleKind>> = Lazy::new(|| {
    HashMap::from([
        ("DOMAIN", RuleKind::Domain),
        ("DOMAIN-SUFFIX", RuleKind::DomainSuffix),
        ("DOMAIN-KEYWORD", RuleKind::DomainKeyword),
        ("DOMAIN-SET", RuleKind::DomainSet),
        ("IP-CIDR", RuleKind::IpCidr),
        ("IP-CIDR6", RuleKind::IpCidr6),
        ("IP-ASN", RuleKind::IpAsn),
        ("GEOIP", RuleKind::GeoIp),
        ("USER-AGENT", RuleKind::UserAgent),
        ("URL-REGEX", RuleKind::UrlRegex),
        ("PROCESS-NAME", RuleKind::ProcessName),
        ("DST-PORT", RuleKind::DstPort),
    ])
});

impl RuleKind {
    pub fn from_prefix(prefix: &str) -> Self {
        RULE_KIND_PREFIXES
            .get(prefix)
            .cloned()
            .unwrap_or_else(|| RuleKind::Other(prefix.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            RuleKind::Domain => "DOMAIN",
            RuleKind::DomainSuffix => "DOMAIN-SUFFIX",
            RuleKind::DomainKeyword => "DOMAIN-KEYWORD",
            RuleKind::DomainSet => "DOMAIN-SET",
            RuleKind::IpCidr => "IP-CIDR",
            RuleKind::IpCidr6 => "IP-CIDR6",
            RuleKind::IpAsn => "IP-ASN",
            RuleKind::GeoIp => "GEOIP",
            RuleKind::UserAgent => "USER-AGENT",
            RuleKind::UrlRegex => "URL-REGEX",
            RuleKind::ProcessName => "PROCESS-NAME",
            RuleKind::DstPort => "DST-PORT",
            RuleKind::Other(prefix) => prefix,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule line such as `DOMAIN-SUFFIX,example.com` or
/// `IP-CIDR,1.2.3.0/24,no-resolve`.
///
/// Only the leading field and the first value are interpreted; the text is
/// kept verbatim so the line can be written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLine<'a> {
    pub kind: RuleKind,
    pub value: &'a str,
    pub text: &'a str,
}

impl<'a> RuleLine<'a> {
    pub fn parse(text: &'a str) -> Self {
        let mut fields = text.splitn(3, ',');
        let prefix = fields.next().unwrap_or_default().trim();
        let value = fields.next().unwrap_or_default().trim();
        RuleLine {
            kind: RuleKind::from_prefix(prefix),
            value,
            text,
        }
    }

    pub fn is_keyword(&self) -> bool {
        self.kind == RuleKind::DomainKeyword
    }

    pub fn is_domain(&self) -> bool {
        self.kind == RuleKind::Domain
    }
}

/// An upstream list mirrored into the repository
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct RuleSource {
    /// Destination relative to the repository root
    pub path: String,
    /// Upstream URL; a missing or empty URL leaves the list alone
    pub url: Option<String>,
    pub reason: String,
}

impl RuleSource {
    pub fn new(path: &str, url: &str, reason: &str) -> Self {
        Self {
            path: path.to_string(),
            url: if url.is_empty() {
                None
            } else {
                Some(url.to_string())
            },
            reason: reason.to_string(),
        }
    }

    /// The URL to fetch, if this source should be synced at all
    pub fn fetch_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Several upstream lists merged into one deduplicated file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct BundleConfig {
    pub path: String,
    /// First header line of the generated file
    pub label: String,
    pub members: Vec<String>,
}
