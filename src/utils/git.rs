use std::path::Path;
use std::process::Command;

use log::info;

use crate::error::{Result, SyncError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    Pulled,
    /// `root` has no `.git` directory
    NotARepository,
}

/// Run `git -C <root> pull --rebase`.
///
/// A non-zero exit status is an error; a root without repository metadata
/// is skipped.
pub fn pull_latest(root: &Path) -> Result<PullOutcome> {
    if !root.join(".git").exists() {
        return Ok(PullOutcome::NotARepository);
    }

    info!("Running git pull --rebase in {}", root.display());
    let status = Command::new("git")
        .arg("-C")
        .arg(root)
        .args(["pull", "--rebase"])
        .status()
        .map_err(|e| SyncError::Git(format!("failed to run git: {}", e)))?;

    if !status.success() {
        return Err(SyncError::Git(format!(
            "git pull --rebase exited with {}",
            status
        )));
    }

    Ok(PullOutcome::Pulled)
}
