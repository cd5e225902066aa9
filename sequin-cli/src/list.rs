use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use sequin_core::{list_operation, Config, ListResult, OutputFormatter};
use std::path::Path;

use crate::OutputFormat;

pub fn handle_list(
    path: &Path,
    sort: bool,
    config: &Config,
    working_dir: Option<&Path>,
    output: OutputFormat,
    use_color: bool,
) -> Result<()> {
    let result = list_operation(path, sort, config, working_dir)?;

    match output {
        OutputFormat::Json => print!("{}", result.format_json()),
        OutputFormat::Summary => println!("{}", render_table(&result, use_color)),
    }

    Ok(())
}

fn render_table(result: &ListResult, use_color: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("Frame").fg(Color::Cyan),
            Cell::new("File").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["Frame", "File"]);
    }

    for (i, name) in result.files.iter().enumerate() {
        let frame = result
            .frames
            .get(i)
            .copied()
            .flatten()
            .map_or_else(|| "-".to_string(), |f| f.to_string());
        table.add_row(vec![frame, name.clone()]);
    }

    table
}
