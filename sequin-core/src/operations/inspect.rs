use super::load_sequence;
use crate::config::Config;
use crate::output::InspectResult;
use crate::sequence::InferOptions;
use anyhow::Result;
use std::path::Path;

/// Inspect operation - describe the sequence a sample file belongs to
pub fn inspect_operation(
    sample: &Path,
    options: InferOptions,
    config: &Config,
    working_dir: Option<&Path>,
) -> Result<InspectResult> {
    let sequence = load_sequence(sample, options, config, working_dir)?;
    let pattern = sequence.pattern();

    Ok(InspectResult {
        sample: sequence.original_filename().to_string(),
        directory: sequence.basedir().display().to_string(),
        is_sequence: !sequence.is_single(),
        pattern: pattern.token_filename(),
        // Same width the listing enumerates with
        regex: pattern.to_regex(true),
        start_number: sequence.start_number(),
        sample_number: sequence.sample_number(),
        file_count: sequence.file_count(),
        messages: sequence.messages().to_vec(),
    })
}
