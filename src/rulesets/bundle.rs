use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use log::{info, warn};

use crate::constants::GENERATED_PREFIX;
use crate::error::Result;
use crate::models::BundleConfig;
use crate::rulesets::compress::compress_rules;
use crate::rulesets::filter::filter_rules;
use crate::utils::file::{write_if_changed_by, WriteOutcome};
use crate::utils::http::RuleFetcher;

/// Fetch every member of `bundle` and merge them into one compressed rule list
pub fn build_bundle<F: RuleFetcher + ?Sized>(
    fetcher: &F,
    bundle: &BundleConfig,
) -> Result<Vec<String>> {
    let mut contents = Vec::with_capacity(bundle.members.len());
    for url in &bundle.members {
        let content = fetcher.fetch_text(url)?;
        if filter_rules(&content).is_empty() {
            warn!("Bundle member {} contains no rules", url);
        }
        contents.push(content);
    }

    let rules = compress_rules(contents.iter().flat_map(|content| filter_rules(content)));
    info!(
        "Merged {} sources into {} rules for {}",
        contents.len(),
        rules.len(),
        bundle.path
    );
    Ok(rules)
}

/// Render a bundle file: label line, generation timestamp, one rule per line
pub fn render_bundle(label: &str, rules: &[String], generated: DateTime<Utc>) -> String {
    let mut output = format!(
        "# {}\n{}{}\n",
        label,
        GENERATED_PREFIX,
        generated.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    for rule in rules {
        output.push_str(rule);
        output.push('\n');
    }
    output
}

/// Split a rendered bundle into its label line and the bytes after the
/// timestamp line. `None` when either header line is missing.
fn split_header(content: &str) -> Option<(&str, &str)> {
    let mut parts = content.splitn(3, '\n');
    let label = parts.next()?;
    let generated = parts.next()?;
    let body = parts.next()?;
    (label.starts_with("# ") && generated.starts_with(GENERATED_PREFIX)).then_some((label, body))
}

/// Compare two rendered bundles, ignoring only the generation timestamp.
///
/// Both must carry the label line first and the timestamp line second;
/// everything after the timestamp line is compared byte for byte.
pub fn same_bundle_body(current: &str, new: &str) -> bool {
    match (split_header(current), split_header(new)) {
        (Some(current), Some(new)) => current == new,
        _ => false,
    }
}

/// Render and write a bundle under `root`, skipping the write when only the
/// timestamp would change
pub fn write_bundle(
    root: &Path,
    bundle: &BundleConfig,
    rules: &[String],
    generated: DateTime<Utc>,
) -> Result<WriteOutcome> {
    let content = render_bundle(&bundle.label, rules, generated);
    write_if_changed_by(&root.join(&bundle.path), &content, same_bundle_body)
}
