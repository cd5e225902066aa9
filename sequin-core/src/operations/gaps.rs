use super::load_sequence;
use crate::config::Config;
use crate::output::GapsResult;
use anyhow::Result;
use std::path::Path;

/// Gaps operation - frames missing from the sequence of a sample file
pub fn gaps_operation(
    sample: &Path,
    config: &Config,
    working_dir: Option<&Path>,
) -> Result<GapsResult> {
    let sequence = load_sequence(sample, config.infer_options(), config, working_dir)?;

    Ok(GapsResult {
        pattern: sequence.pattern().token_filename(),
        start_number: sequence.start_number(),
        missing: sequence.detect_gaps().unwrap_or_default(),
    })
}
