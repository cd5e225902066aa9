//! Filesystem primitives the renamer works through.

use crate::error::{Result, SequenceError};
use std::fs;
use std::path::Path;

pub trait FileSystem {
    fn create_dir(&self, path: &Path) -> Result<()>;
    fn move_file(&self, from: &Path, to: &Path) -> Result<()>;
    fn copy_file(&self, from: &Path, to: &Path) -> Result<()>;
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
    fn is_file(&self, path: &Path) -> bool;
    fn exists(&self, path: &Path) -> bool;

    /// Whether two paths name the same directory
    fn is_same_dir(&self, a: &Path, b: &Path) -> bool {
        match (a.canonicalize(), b.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => a == b,
        }
    }
}

/// [`FileSystem`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn create_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir(path).map_err(|e| SequenceError::io(path, e))
    }

    fn move_file(&self, from: &Path, to: &Path) -> Result<()> {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            // Cross-device moves fall back to copy + delete
            Err(_) if from.is_file() && !to.exists() => {
                fs::copy(from, to).map_err(|e| SequenceError::io(from, e))?;
                fs::remove_file(from).map_err(|e| SequenceError::io(from, e))
            },
            Err(e) => Err(SequenceError::io(from, e)),
        }
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<()> {
        fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| SequenceError::io(from, e))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path).map_err(|e| SequenceError::io(path, e))
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
