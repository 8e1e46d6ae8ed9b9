use std::{
    fs,
    path::{Path, PathBuf}
};

use tracing::info;

use crate::{
    error::{FeloError, Result},
    format::{parse_with_source, rewrite_roster, serialize, FeloFile},
    model::structures::{contest::Contest, parameters::Parameters, participant::Roster}
};

/// Reads and parses a Felo file. Group name and output directory default to
/// values derived from `path`.
pub fn read_felo_file(path: &Path) -> Result<FeloFile> {
    let text = fs::read_to_string(path)?;
    parse_with_source(&text, Some(path))
}

/// Writes a complete Felo file, replacing `path` if it exists.
pub fn write_felo_file(path: &Path, parameters: &Parameters, roster: &Roster, contests: &[Contest]) -> Result<()> {
    fs::write(path, serialize(parameters, roster, contests))?;
    info!(path = %path.display(), "Wrote Felo file");

    Ok(())
}

/// Where [`write_back_roster`] keeps the previous version of `path`.
pub fn backup_path(path: &Path) -> PathBuf {
    path.with_extension("bak")
}

/// Replaces the roster section of the Felo file at `path` and keeps the old
/// file as a backup copy. Refuses to overwrite an existing backup.
///
/// Returns the path of the backup.
pub fn write_back_roster(path: &Path, roster: &Roster) -> Result<PathBuf> {
    let backup = backup_path(path);
    if backup.exists() {
        return Err(FeloError::BackupExists(backup));
    }

    let original = fs::read_to_string(path)?;
    let rewritten = rewrite_roster(&original, roster)?;
    fs::copy(path, &backup)?;
    fs::write(path, rewritten)?;
    info!(path = %path.display(), backup = %backup.display(), "Wrote back initial ratings");

    Ok(backup)
}
