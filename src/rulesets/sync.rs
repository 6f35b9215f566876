use std::fmt;
use std::path::PathBuf;

use chrono::Utc;
use log::info;

use crate::error::Result;
use crate::models::RuleSource;
use crate::rulesets::bundle::{build_bundle, write_bundle};
use crate::settings::SyncSettings;
use crate::utils::file::{write_if_changed, WriteOutcome};
use crate::utils::git::{pull_latest, PullOutcome};
use crate::utils::http::RuleFetcher;

/// A status line produced while syncing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    Pulled,
    PullSkipped,
    LocalList { path: String },
    MissingUrl { path: String },
    Updated { path: String, reason: String },
    Unchanged { path: String },
}

impl fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncEvent::Pulled => write!(f, "Pulled latest changes"),
            SyncEvent::PullSkipped => {
                write!(f, "Skipping git pull: repository metadata not found")
            }
            SyncEvent::LocalList { path } => write!(f, "Skipping {}: local manual list", path),
            SyncEvent::MissingUrl { path } => write!(f, "Skipping {}: missing URL", path),
            SyncEvent::Updated { path, reason } => write!(f, "Updated {} ({})", path, reason),
            SyncEvent::Unchanged { path } => write!(f, "No changes for {}", path),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Run `git pull --rebase` before syncing
    pub pull: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self { pull: true }
    }
}

/// Counts of what a completed run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub updated: usize,
    pub unchanged: usize,
    pub skipped: usize,
}

impl SyncSummary {
    fn record(&mut self, event: &SyncEvent) {
        match event {
            SyncEvent::Updated { .. } => self.updated += 1,
            SyncEvent::Unchanged { .. } => self.unchanged += 1,
            SyncEvent::LocalList { .. } | SyncEvent::MissingUrl { .. } => self.skipped += 1,
            SyncEvent::Pulled | SyncEvent::PullSkipped => {}
        }
    }
}

fn write_event(path: &str, reason: &str, outcome: WriteOutcome) -> SyncEvent {
    match outcome {
        WriteOutcome::Updated => SyncEvent::Updated {
            path: path.to_string(),
            reason: reason.to_string(),
        },
        WriteOutcome::Unchanged => SyncEvent::Unchanged {
            path: path.to_string(),
        },
    }
}

/// Runs the sync pipeline against one repository root
pub struct Syncer<'a, F: RuleFetcher + ?Sized> {
    settings: &'a SyncSettings,
    fetcher: &'a F,
    root: PathBuf,
}

impl<'a, F: RuleFetcher + ?Sized> Syncer<'a, F> {
    pub fn new(settings: &'a SyncSettings, fetcher: &'a F, root: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            fetcher,
            root: root.into(),
        }
    }

    /// Run the whole pipeline, handing each status event to `emit` as it
    /// happens. The first error stops the run.
    pub fn run<E>(&self, options: SyncOptions, mut emit: E) -> Result<SyncSummary>
    where
        E: FnMut(&SyncEvent),
    {
        let mut summary = SyncSummary::default();
        let mut report = |event: SyncEvent| {
            summary.record(&event);
            emit(&event);
        };

        if options.pull {
            match pull_latest(&self.root)? {
                PullOutcome::Pulled => report(SyncEvent::Pulled),
                PullOutcome::NotARepository => report(SyncEvent::PullSkipped),
            }
        }

        for path in &self.settings.local_rules {
            report(SyncEvent::LocalList { path: path.clone() });
        }

        report(self.sync_bundle()?);

        for source in &self.settings.sources {
            report(self.sync_source(source)?);
        }

        info!(
            "Sync finished: {} updated, {} unchanged, {} skipped",
            summary.updated, summary.unchanged, summary.skipped
        );
        Ok(summary)
    }

    /// Build the merged bundle and write it
    pub fn sync_bundle(&self) -> Result<SyncEvent> {
        let bundle = &self.settings.bundle;
        let rules = build_bundle(self.fetcher, bundle)?;
        let outcome = write_bundle(&self.root, bundle, &rules, Utc::now())?;
        Ok(write_event(&bundle.path, &bundle.label, outcome))
    }

    /// Mirror one upstream list verbatim; sources without a URL are skipped
    pub fn sync_source(&self, source: &RuleSource) -> Result<SyncEvent> {
        let Some(url) = source.fetch_url() else {
            return Ok(SyncEvent::MissingUrl {
                path: source.path.clone(),
            });
        };

        let content = self.fetcher.fetch_text(url)?;
        let outcome = write_if_changed(&self.root.join(&source.path), &content)?;
        Ok(write_event(&source.path, &source.reason, outcome))
    }
}
