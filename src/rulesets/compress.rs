use std::collections::BTreeSet;

use log::debug;

use crate::constants::{DOMINANT_DOMAIN, DOMINANT_KEYWORD};
use crate::models::RuleLine;

/// True when `rule` is already matched by a bare `DOMAIN-KEYWORD,google`
fn covered_by_dominant_keyword(rule: &RuleLine<'_>) -> bool {
    if rule.is_keyword() {
        return rule.value != DOMINANT_KEYWORD && rule.value.contains(DOMINANT_KEYWORD);
    }
    if rule.is_domain() {
        return rule.value == DOMINANT_DOMAIN
            || rule
                .value
                .strip_suffix(DOMINANT_DOMAIN)
                .is_some_and(|head| head.ends_with('.'));
    }
    false
}

/// Merge the rule lines of a bundle into a sorted, duplicate-free list.
///
/// When the bundle contains `DOMAIN-KEYWORD,google`, other keyword rules
/// containing `google` and `DOMAIN` rules for `google.com` or its
/// subdomains are dropped. Without that keyword nothing is suppressed.
pub fn compress_rules<'a, I>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let rules: Vec<RuleLine<'a>> = lines.into_iter().map(RuleLine::parse).collect();

    let keywords: BTreeSet<&str> = rules
        .iter()
        .filter(|rule| rule.is_keyword())
        .map(|rule| rule.value)
        .collect();
    let dominant = keywords.contains(DOMINANT_KEYWORD);

    let mut merged = BTreeSet::new();
    let mut suppressed = 0usize;
    for rule in &rules {
        if dominant && covered_by_dominant_keyword(rule) {
            suppressed += 1;
            continue;
        }
        merged.insert(rule.text);
    }

    debug!(
        "Compressed {} rule lines into {} ({} redundant, {} distinct keywords)",
        rules.len(),
        merged.len(),
        suppressed,
        keywords.len()
    );

    merged.into_iter().map(str::to_string).collect()
}
