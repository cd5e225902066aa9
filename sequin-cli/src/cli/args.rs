use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;

/// Detect numbered image sequences and renumber them
#[derive(Parser, Debug)]
#[command(name = "sequin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG is used otherwise
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Run as if started in <path> instead of the current working directory
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,
}

/// How the sequence of a sample file is inferred
#[derive(Args, Debug, Clone, Default)]
pub struct InferArgs {
    /// Pick the last changing number when a name has several
    #[arg(long)]
    pub non_strict: bool,

    /// Compare against every file in the directory instead of a sample
    #[arg(long)]
    pub full_scan: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Describe the image sequence a file belongs to
    Inspect {
        /// Any frame of the sequence
        path: PathBuf,

        #[command(flatten)]
        infer: InferArgs,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// List frames missing from a sequence
    Gaps {
        /// Any frame of the sequence
        path: PathBuf,

        #[command(flatten)]
        infer: InferArgs,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// List the files of a sequence
    List {
        /// Any frame of the sequence
        path: PathBuf,

        /// Keep directory order instead of sorting by frame number
        #[arg(long)]
        no_sort: bool,

        #[command(flatten)]
        infer: InferArgs,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Renumber a sequence into consecutive, zero-padded frames
    Rename {
        /// Any frame of the sequence
        path: PathBuf,

        /// First frame number of the renamed sequence
        #[arg(long, default_value_t = 0, value_name = "N")]
        start: u64,

        /// Copy the renamed files into this directory instead of renaming in place
        #[arg(long, value_name = "DIR")]
        to: Option<PathBuf>,

        /// Name for the renamed files (defaults to the current name without its counter)
        #[arg(long, value_name = "ROOT")]
        name: Option<String>,

        #[command(flatten)]
        infer: InferArgs,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Show version information
    Version {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },
}

impl InferArgs {
    /// Apply command line overrides on top of the loaded config
    pub fn apply(&self, config: &mut sequin_core::Config) {
        if self.non_strict {
            config.strict = false;
        }
        if self.full_scan {
            config.full_scan = true;
        }
    }
}
