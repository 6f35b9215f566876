use crate::constants::COMMENT_PREFIXES;

/// Extract rule lines from raw list text.
///
/// Lines are trimmed; blank lines, comments (`#`, `!`, `;`) and section
/// headers (`[...]`) are dropped. Order is preserved.
pub fn filter_rules(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(&COMMENT_PREFIXES[..]))
        .collect()
}
