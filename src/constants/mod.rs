/// User agent sent with every upstream fetch
pub const DEFAULT_USER_AGENT: &str = "ShadowRocketSync/1.0";

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Proxy setting that reads the proxy from the environment
pub const PROXY_SYSTEM: &str = "SYSTEM";

/// Proxy setting that forces direct connections
pub const PROXY_NONE: &str = "NONE";

/// Prefix of the timestamp line in a bundle header
pub const GENERATED_PREFIX: &str = "# Generated: ";

/// Keyword that makes narrower google rules redundant inside a bundle
pub const DOMINANT_KEYWORD: &str = "google";

/// Domain covered by the dominant keyword
pub const DOMINANT_DOMAIN: &str = "google.com";

/// Line prefixes dropped by the rule filter
pub const COMMENT_PREFIXES: [char; 4] = ['#', '!', ';', '['];

const BLACKMATRIX7_BASE: &str =
    "https://raw.githubusercontent.com/blackmatrix7/ios_rule_script/master/rule/Shadowrocket";

const MISHA_TGSHV_BASE: &str =
    "https://raw.githubusercontent.com/misha-tgshv/shadowrocket-configuration-file/main/rules";

/// Shadowrocket list URL in the blackmatrix7 rule collection
pub fn blackmatrix7_url(name: &str) -> String {
    format!("{}/{}/{}.list", BLACKMATRIX7_BASE, name, name)
}

/// Rule list URL in the misha-tgshv configuration repository
pub fn misha_tgshv_url(file: &str) -> String {
    format!("{}/{}", MISHA_TGSHV_BASE, file)
}
