pub mod args;
pub mod types;

pub use args::{Cli, Commands, InferArgs};
pub use types::OutputFormat;
