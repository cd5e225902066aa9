//! Directory listings used by inference and renaming.

use crate::error::{Result, SequenceError};
use log::debug;
use std::path::Path;
use walkdir::WalkDir;

/// Uppercased extension without the dot, used for comparisons
pub fn extension_key(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_uppercase)
}

/// Names of the regular files directly inside `dir`, sorted by name.
///
/// Entries whose names are not valid UTF-8 are skipped.
pub fn list_files(dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            SequenceError::io(path, std::io::Error::from(e))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) => files.push(name.to_string()),
            None => debug!("Skipping non UTF-8 file name {}", entry.path().display()),
        }
    }
    Ok(files)
}

/// Files in `dir` whose extension matches `extension` case-insensitively
pub fn fetch_siblings(dir: &Path, extension: &str) -> Result<Vec<String>> {
    let wanted = extension.trim_start_matches('.').to_uppercase();
    Ok(list_files(dir)?
        .into_iter()
        .filter(|name| extension_key(Path::new(name)).as_deref() == Some(wanted.as_str()))
        .collect())
}
