use anyhow::Result;
use clap::Parser;
use log::{warn, LevelFilter};
use sequin_core::{Config, OutputFormatter, SequenceError, VersionResult};
use std::io::{self, IsTerminal};
use std::path::Path;
use std::process;

mod cli;
mod gaps;
mod inspect;
mod list;
mod rename;

use cli::{Cli, Commands, OutputFormat};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let use_color = !cli.no_color && io::stdout().is_terminal();

    let working_dir = cli.directory.as_deref();
    if let Some(dir) = working_dir {
        if !dir.is_dir() {
            eprintln!("Error: {} is not a directory", dir.display());
            process::exit(2);
        }
    }

    let mut config = load_config(working_dir);

    let result = match cli.command {
        Commands::Inspect {
            path,
            infer,
            output,
        } => {
            infer.apply(&mut config);
            inspect::handle_inspect(&path, &config, working_dir, output, use_color)
        },

        Commands::Gaps {
            path,
            infer,
            output,
        } => {
            infer.apply(&mut config);
            gaps::handle_gaps(&path, &config, working_dir, output, use_color)
        },

        Commands::List {
            path,
            no_sort,
            infer,
            output,
        } => {
            infer.apply(&mut config);
            list::handle_list(&path, !no_sort, &config, working_dir, output, use_color)
        },

        Commands::Rename {
            path,
            start,
            to,
            name,
            infer,
            output,
        } => {
            infer.apply(&mut config);
            rename::handle_rename(
                &path,
                start,
                to.as_deref(),
                name.as_deref(),
                &config,
                working_dir,
                output,
                use_color,
            )
        },

        Commands::Version { output } => handle_version(output),
    };

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(exit_code(&e));
        },
    }
}

/// `RUST_LOG` decides the level unless `-v` was given
fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match verbose {
        0 => {},
        1 => {
            builder.filter_level(LevelFilter::Info);
        },
        _ => {
            builder.filter_level(LevelFilter::Debug);
        },
    }
    builder.format_timestamp(None).init();
}

fn load_config(working_dir: Option<&Path>) -> Config {
    let loaded = match working_dir {
        Some(dir) => Config::load_from_dir(dir),
        None => Config::load(),
    };
    loaded.unwrap_or_else(|e| {
        warn!("Ignoring config: {e:#}");
        Config::default()
    })
}

/// 2 for bad input, 1 for ambiguous sequences and failed renames, 3 otherwise
fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<SequenceError>())
        .map_or(3, SequenceError::exit_code)
}

fn handle_version(output: OutputFormat) -> Result<()> {
    let result = VersionResult {
        name: "sequin".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("{}", result.format(output.into()));
    Ok(())
}
