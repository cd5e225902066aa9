use super::load_sequence;
use crate::config::Config;
use crate::output::ListResult;
use anyhow::{Context, Result};
use std::path::Path;

/// List operation - every file on disk matching the sample's pattern
pub fn list_operation(
    sample: &Path,
    sort: bool,
    config: &Config,
    working_dir: Option<&Path>,
) -> Result<ListResult> {
    let sequence = load_sequence(sample, config.infer_options(), config, working_dir)?;
    let files = sequence
        .list_sequence_files(sort)
        .with_context(|| format!("Failed to list {}", sequence.basedir().display()))?;

    let matcher = sequence.pattern().matcher(true)?;
    let frames = files.iter().map(|name| matcher.counter_value(name)).collect();

    Ok(ListResult {
        pattern: sequence.pattern().token_filename(),
        files,
        frames,
    })
}
