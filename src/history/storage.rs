use super::types::RentHistory;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Where recorded months live unless `--history-file` says otherwise.
pub fn get_history_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("history.json"))
}

/// Read every recorded month. A household that has never saved a month has
/// no file yet, which reads as an empty history; a file written by a newer
/// format version is refused rather than guessed at.
pub fn load_history(path: &Path) -> Result<RentHistory> {
    if !path.exists() {
        return Ok(RentHistory::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open history file at {}", path.display()))?;

    let history: RentHistory =
        serde_json::from_reader(file).context("Failed to load rent history")?;

    if history.version != 1 {
        anyhow::bail!("Unsupported rent history version: {}", history.version);
    }

    Ok(history)
}

/// Replace the history file with `history`. Readers see either the old set
/// of months or the new one, never a half-written file.
pub fn save_history(path: &Path, history: &RentHistory) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create history directory at {}", parent.display())
            })?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, history).context("Failed to serialize rent history")?;

    file.commit().context("Failed to save rent history")?;

    Ok(())
}
