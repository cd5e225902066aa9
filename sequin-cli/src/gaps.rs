use anyhow::Result;
use nu_ansi_term::Color;
use sequin_core::{gaps_operation, Config, OutputFormatter};
use std::path::Path;

use crate::OutputFormat;

pub fn handle_gaps(
    path: &Path,
    config: &Config,
    working_dir: Option<&Path>,
    output: OutputFormat,
    use_color: bool,
) -> Result<()> {
    let result = gaps_operation(path, config, working_dir)?;

    match output {
        OutputFormat::Summary if use_color && !result.missing.is_empty() => {
            println!(
                "{} missing frame(s) in {}:",
                result.missing.len(),
                Color::Cyan.paint(&result.pattern)
            );
            for name in &result.missing {
                println!("  {}", Color::Red.paint(name));
            }
        },
        _ => print!("{}", result.format(output.into())),
    }

    Ok(())
}
