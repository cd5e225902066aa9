//! High-level operations that correspond to CLI commands
//!
//! These modules contain the logic behind each sequin command, separated
//! from CLI concerns like argument parsing and output formatting.

pub mod gaps;
pub mod inspect;
pub mod list;
pub mod rename;

pub use gaps::gaps_operation;
pub use inspect::inspect_operation;
pub use list::list_operation;
pub use rename::rename_operation;

use crate::config::Config;
use crate::sequence::{infer, ImageSequence, InferOptions};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Resolve `path` against `working_dir` (or the process directory)
pub(crate) fn resolve_path(path: &Path, working_dir: Option<&Path>) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let base = match working_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    Ok(base.join(path))
}

/// Infer the sequence a sample file belongs to using the configured formats
pub(crate) fn load_sequence(
    sample: &Path,
    options: InferOptions,
    config: &Config,
    working_dir: Option<&Path>,
) -> Result<ImageSequence> {
    let sample = resolve_path(sample, working_dir)?;
    infer(&sample, &config.allowed_extensions(), options)
        .with_context(|| format!("Failed to inspect {}", sample.display()))
}
