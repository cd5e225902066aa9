use anyhow::Result;
use nu_ansi_term::Color;
use sequin_core::{inspect_operation, Config, InspectResult, OutputFormatter};
use std::fmt::Write;
use std::path::Path;

use crate::OutputFormat;

pub fn handle_inspect(
    path: &Path,
    config: &Config,
    working_dir: Option<&Path>,
    output: OutputFormat,
    use_color: bool,
) -> Result<()> {
    let result = inspect_operation(path, config.infer_options(), config, working_dir)?;

    match output {
        OutputFormat::Summary if use_color => print!("{}", colored_summary(&result)),
        _ => print!("{}", result.format(output.into())),
    }

    Ok(())
}

fn colored_summary(result: &InspectResult) -> String {
    let mut output = String::new();

    if result.is_sequence {
        let _ = writeln!(
            output,
            "Sequence: {}",
            Color::Cyan.bold().paint(&result.pattern)
        );
        let _ = writeln!(output, "Start number: {}", Color::Green.paint(result.start_number.to_string()));
        if let Some(sample) = result.sample_number {
            let _ = writeln!(output, "Sample frame: {}", sample);
        }
    } else {
        let _ = writeln!(output, "Single file: {}", Color::Cyan.paint(&result.sample));
    }
    let _ = writeln!(output, "Files of this type: {}", result.file_count);

    for message in &result.messages {
        let _ = writeln!(output, "{} {}", Color::Yellow.paint("Note:"), message);
    }

    output
}
