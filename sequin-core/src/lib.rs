#![allow(unused)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod decompose;
pub mod digit_format;
pub mod error;
pub mod fs;
pub mod lock;
pub mod operations;
pub mod output;
pub mod pattern;
pub mod rename;
pub mod sequence;
pub mod siblings;
pub mod similarity;
pub mod strip;

pub use config::Config;
pub use decompose::{decompose, FilenameRoot, HeadMidTail, Segment, SegmentKind};
pub use digit_format::{parse_digit_format_specifier, DigitFormatSpecifier, MAX_WIDTH};
pub use error::{Result, SequenceError};
pub use fs::{FileSystem, StdFileSystem};
pub use lock::LockFile;
pub use operations::{gaps_operation, inspect_operation, list_operation, rename_operation};
pub use output::{
    GapsResult, InspectResult, ListResult, OutputFormat, OutputFormatter, RenameResult,
    VersionResult,
};
pub use pattern::{CanonicalPattern, PatternPart, SequenceMatcher};
pub use rename::{
    rename_sequence, resolve_output_root, OutputRoot, RenameOptions, RenameOutcome, RenameStage,
    RenamedFile,
};
pub use sequence::{infer, infer_with_scorer, ImageSequence, InferOptions, SequenceKind};
pub use siblings::{fetch_siblings, list_files};
pub use similarity::{levenshtein_distance, sample_size, EditDistanceScorer, SegmentScorer};
pub use strip::{strip_special_chars, StrippedRoot};
