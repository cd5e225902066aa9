//! Batch renaming of an inferred sequence into consecutive, zero-padded
//! numbers.
//!
//! Files travel through a staging directory inside the source directory so
//! that an old name colliding with a new one never overwrites a frame:
//! `Pending -> Staged -> Committed`. A failure leaves the files either where
//! they started or in the staging directory, never half way into the
//! destination.

use crate::error::{Result, SequenceError};
use crate::fs::FileSystem;
use crate::sequence::ImageSequence;
use crate::strip::strip_special_chars;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How renamed files are named
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum OutputRoot {
    /// The sequence name without its counter and the punctuation around it
    #[default]
    Derived,
    /// A caller-supplied name
    Named(String),
}

#[derive(Debug, Clone)]
pub struct RenameOptions {
    /// First number of the renamed sequence
    pub start_offset: u64,
    /// Target directory; the source directory when `None`
    pub destination_dir: Option<PathBuf>,
    pub output_root: OutputRoot,
    /// Characters stripped around the counter of a derived root
    pub special_chars: Vec<char>,
    /// Extensions dropped from the end of a named root (uppercase, no dot)
    pub media_extensions: Vec<String>,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            start_offset: 0,
            destination_dir: None,
            output_root: OutputRoot::Derived,
            special_chars: Vec::new(),
            media_extensions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameStage {
    Pending,
    Staged,
    Committed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamedFile {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameOutcome {
    pub files: usize,
    pub stage: RenameStage,
    pub destination_dir: PathBuf,
    pub output_root: String,
    /// Files were moved rather than copied
    pub moved: bool,
    pub renamed: Vec<RenamedFile>,
}

/// Name given to renamed files, before counter and extension
pub fn resolve_output_root(sequence: &ImageSequence, options: &RenameOptions) -> String {
    match &options.output_root {
        OutputRoot::Named(name) => {
            let path = Path::new(name);
            let known_extension = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| {
                    options
                        .media_extensions
                        .iter()
                        .any(|m| m.trim_start_matches('.').eq_ignore_ascii_case(e))
                });
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) if known_extension => stem.to_string(),
                _ => name.clone(),
            }
        },
        OutputRoot::Derived => match sequence.counter_index() {
            None => sequence.root().reassemble(),
            Some(index) => {
                strip_special_chars(sequence.root(), index, &options.special_chars)
                    .strip_leading_dots()
                    .root
            },
        },
    }
}

/// Digits needed to write `n`
fn digit_count(n: u64) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

/// Timestamped staging directory inside `dir`
fn staging_dir(dir: &Path) -> PathBuf {
    dir.join(format!("tmp{}", chrono::Local::now().format("%y%m%d%H%M%S")))
}

/// Rename (and possibly move) every file of `sequence` into a consecutive
/// sequence starting at `options.start_offset`.
///
/// Files are moved when the destination is the source directory and copied
/// otherwise.
pub fn rename_sequence(
    sequence: &ImageSequence,
    options: &RenameOptions,
    fs: &dyn FileSystem,
) -> Result<RenameOutcome> {
    let source_dir = sequence.basedir();
    let destination_dir = options
        .destination_dir
        .clone()
        .unwrap_or_else(|| source_dir.to_path_buf());
    if !destination_dir.is_dir() {
        return Err(SequenceError::InvalidInput(format!(
            "destination '{}' is not a directory",
            destination_dir.display()
        )));
    }

    let output_root = resolve_output_root(sequence, options);
    let moving = fs.is_same_dir(source_dir, &destination_dir);

    if sequence.is_single() {
        return rename_single(sequence, &output_root, destination_dir, moving, fs);
    }

    let pattern = sequence.pattern();
    let matcher = pattern.matcher(true)?;
    let files = sequence.list_sequence_files(true)?;
    let width = digit_count(files.len() as u64 + options.start_offset);
    let keep_name = pattern.literal_root() == output_root;
    let counter_leads = pattern.counter_leads();

    let staging = staging_dir(source_dir);
    fs.create_dir(&staging)?;
    debug!("Staging {} file(s) in {}", files.len(), staging.display());

    let mut staged: Vec<(String, PathBuf)> = Vec::with_capacity(files.len());
    let mut number = options.start_offset;
    for name in &files {
        let source = source_dir.join(name);
        if !fs.is_file(&source) || matcher.counter_text(name).is_none() {
            continue;
        }

        let index = format!("{:0width$}", number, width = width);
        let new_root = if keep_name {
            pattern.substitute(&index)
        } else if counter_leads {
            format!("{index}{output_root}")
        } else {
            format!("{output_root}{index}")
        };
        let target = staging.join(format!("{}{}", new_root, pattern.extension()));

        let result = if moving {
            fs.move_file(&source, &target)
        } else {
            fs.copy_file(&source, &target)
        };
        if let Err(e) = result {
            return Err(abort_staging(&staging, source_dir, moving, &staged, e, fs));
        }
        debug!("Staged {} -> {}", name, target.display());
        staged.push((name.clone(), target));
        number += 1;
    }

    if staged.is_empty() {
        fs.remove_dir_all(&staging)?;
        let verb = if moving { "rename" } else { "move and rename" };
        return Err(SequenceError::RenameFailed {
            message: format!(
                "unable to {} any files from {}",
                verb,
                source_dir.display()
            ),
            recovery_dir: None,
        });
    }

    let mut renamed = Vec::with_capacity(staged.len());
    for (original, staged_path) in &staged {
        let Some(file_name) = staged_path.file_name() else {
            continue;
        };
        let destination = destination_dir.join(file_name);
        if fs.exists(&destination) {
            warn!("Overwriting existing file {}", destination.display());
        }
        if let Err(e) = fs.move_file(staged_path, &destination) {
            return Err(SequenceError::RenameFailed {
                message: format!(
                    "moving renamed files to {} failed after {} file(s) ({}); the remaining files can be recovered from {}",
                    destination_dir.display(),
                    renamed.len(),
                    e,
                    staging.display()
                ),
                recovery_dir: Some(staging),
            });
        }
        renamed.push(RenamedFile {
            from: original.clone(),
            to: file_name.to_string_lossy().into_owned(),
        });
    }

    if renamed.is_empty() {
        return Err(SequenceError::RenameFailed {
            message: format!(
                "unable to move renamed files from the staging directory to {}; they can be recovered from {}",
                destination_dir.display(),
                staging.display()
            ),
            recovery_dir: Some(staging),
        });
    }

    fs.remove_dir_all(&staging)?;
    info!(
        "Renamed {} file(s) into {}",
        renamed.len(),
        destination_dir.display()
    );

    Ok(RenameOutcome {
        files: renamed.len(),
        stage: RenameStage::Committed,
        destination_dir,
        output_root,
        moved: moving,
        renamed,
    })
}

/// Undo a partial staging so the source directory is back where it started.
///
/// Moved files are returned to their original names. Only when that fails
/// is the staging directory kept and reported for recovery.
fn abort_staging(
    staging: &Path,
    source_dir: &Path,
    moving: bool,
    staged: &[(String, PathBuf)],
    cause: SequenceError,
    fs: &dyn FileSystem,
) -> SequenceError {
    if moving && !staged.is_empty() {
        warn!(
            "Staging failed after {} file(s), moving them back: {}",
            staged.len(),
            cause
        );
        let mut errors = Vec::new();
        for (original, staged_path) in staged.iter().rev() {
            let source = source_dir.join(original);
            debug!("Restoring {} -> {}", staged_path.display(), source.display());
            if let Err(e) = fs.move_file(staged_path, &source) {
                errors.push(format!("{}: {}", original, e));
            }
        }
        if !errors.is_empty() {
            return SequenceError::RenameFailed {
                message: format!(
                    "staging stopped after {} file(s) ({}) and {} could not be restored ({}); they can be recovered from {}",
                    staged.len(),
                    cause,
                    errors.len(),
                    errors.join("; "),
                    staging.display()
                ),
                recovery_dir: Some(staging.to_path_buf()),
            };
        }
    }

    if let Err(e) = fs.remove_dir_all(staging) {
        warn!("Failed to remove staging directory {}: {}", staging.display(), e);
    }
    cause
}

fn rename_single(
    sequence: &ImageSequence,
    output_root: &str,
    destination_dir: PathBuf,
    moving: bool,
    fs: &dyn FileSystem,
) -> Result<RenameOutcome> {
    let source = sequence.path();
    let target_name = format!("{}{}", output_root, sequence.pattern().extension());
    let destination = destination_dir.join(&target_name);

    if moving {
        fs.move_file(&source, &destination)?;
    } else {
        fs.copy_file(&source, &destination)?;
    }

    if !fs.is_file(&destination) {
        let verb = if moving { "rename" } else { "move and rename" };
        return Err(SequenceError::RenameFailed {
            message: format!(
                "unable to {} file from {}",
                verb,
                sequence.basedir().display()
            ),
            recovery_dir: None,
        });
    }

    info!("Renamed {} -> {}", sequence.original_filename(), destination.display());
    Ok(RenameOutcome {
        files: 1,
        stage: RenameStage::Committed,
        destination_dir,
        output_root: output_root.to_string(),
        moved: moving,
        renamed: vec![RenamedFile {
            from: sequence.original_filename().to_string(),
            to: target_name,
        }],
    })
}
