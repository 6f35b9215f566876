use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, info};

use crate::error::{Result, SyncError};

/// Result of writing a rule list to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Updated,
    Unchanged,
}

/// Write `content` to `path` unless the file already holds exactly these bytes.
///
/// Parent directories are created as needed.
pub fn write_if_changed(path: &Path, content: &str) -> Result<WriteOutcome> {
    write_if_changed_by(path, content, |current, new| current == new)
}

/// Like [`write_if_changed`], with `same` deciding whether the current file
/// content already matches the new content.
///
/// A file that is not valid UTF-8 is always rewritten.
pub fn write_if_changed_by<F>(path: &Path, content: &str, same: F) -> Result<WriteOutcome>
where
    F: Fn(&str, &str) -> bool,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| SyncError::io(parent, e))?;
        }
    }

    match fs::read(path) {
        Ok(current) => {
            if let Ok(current) = std::str::from_utf8(&current) {
                if same(current, content) {
                    debug!("{} is up to date", path.display());
                    return Ok(WriteOutcome::Unchanged);
                }
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(SyncError::io(path, e)),
    }

    fs::write(path, content).map_err(|e| SyncError::io(path, e))?;
    info!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(WriteOutcome::Updated)
}
