use anyhow::Result;
use nu_ansi_term::Color;
use sequin_core::{rename_operation, Config, OutputFormatter};
use std::path::Path;

use crate::OutputFormat;

#[allow(clippy::too_many_arguments)]
pub fn handle_rename(
    path: &Path,
    start: u64,
    to: Option<&Path>,
    name: Option<&str>,
    config: &Config,
    working_dir: Option<&Path>,
    output: OutputFormat,
    use_color: bool,
) -> Result<()> {
    let result = rename_operation(path, start, to, name, config, working_dir)?;

    match output {
        OutputFormat::Json => print!("{}", result.format_json()),
        OutputFormat::Summary => {
            let summary = result.format_summary();
            if use_color {
                print!("{}", Color::Green.paint(summary));
            } else {
                print!("{}", summary);
            }
            for file in &result.renamed {
                log::info!("{} -> {}", file.from, file.to);
            }
        },
    }

    Ok(())
}
