use super::{load_sequence, resolve_path};
use crate::config::Config;
use crate::fs::StdFileSystem;
use crate::lock::LockFile;
use crate::output::RenameResult;
use crate::rename::{rename_sequence, OutputRoot, RenameOptions};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Rename operation - renumber the sequence of a sample file.
///
/// `destination` is created when missing; `name` replaces the derived
/// output root.
pub fn rename_operation(
    sample: &Path,
    start: u64,
    destination: Option<&Path>,
    name: Option<&str>,
    config: &Config,
    working_dir: Option<&Path>,
) -> Result<RenameResult> {
    // Held from inference through commit so the listing cannot go stale
    let sample_path = resolve_path(sample, working_dir)?;
    let _lock = match sample_path.parent() {
        Some(dir) if dir.is_dir() => Some(
            LockFile::acquire(dir).context("Failed to acquire lock for sequin rename")?,
        ),
        _ => None,
    };

    let sequence = load_sequence(&sample_path, config.infer_options(), config, working_dir)?;

    let destination_dir: Option<PathBuf> = match destination {
        Some(dir) => {
            let dir = resolve_path(dir, working_dir)?;
            fs::create_dir_all(&dir).with_context(|| {
                format!("Failed to create destination directory {}", dir.display())
            })?;
            Some(dir)
        },
        None => None,
    };

    let options = RenameOptions {
        start_offset: start,
        destination_dir,
        output_root: name.map_or(OutputRoot::Derived, |n| OutputRoot::Named(n.to_string())),
        special_chars: config.special_chars.clone(),
        media_extensions: config.media_extensions(),
    };

    let outcome = rename_sequence(&sequence, &options, &StdFileSystem).with_context(|| {
        format!(
            "Failed to rename {}",
            sequence.pattern().token_filename()
        )
    })?;

    Ok(RenameResult {
        pattern: sequence.pattern().token_filename(),
        output_root: outcome.output_root,
        destination_dir: outcome.destination_dir.display().to_string(),
        moved: outcome.moved,
        files: outcome.files,
        renamed: outcome.renamed,
    })
}
