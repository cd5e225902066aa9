use std::path::PathBuf;

/// Errors raised by sequence inference and renaming
#[derive(Debug, thiserror::Error)]
pub enum SequenceError {
    /// Malformed path, unsupported extension or a `%` in the filename
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Malformed digit format specifier or numeric string
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Zero or several counter candidates were found
    #[error("ambiguous sequence: {0}")]
    AmbiguousSequence(String),

    /// A rename stage transitioned zero files
    #[error("rename failed: {message}")]
    RenameFailed {
        message: String,
        /// Directory holding the files that can be recovered, if any
        recovery_dir: Option<PathBuf>,
    },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SequenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Exit code used by the CLI for this error kind
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput(_) | Self::InvalidArgument(_) => 2,
            Self::AmbiguousSequence(_) | Self::RenameFailed { .. } => 1,
            Self::Io { .. } => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, SequenceError>;
