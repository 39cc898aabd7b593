//! core/error.rs
//!
//! Every fatal per-file failure, tagged with the path it came from.
//!
//! - `Parse`: the ID3v2 container could not be read
//! - `Io`: open/read/seek/write/rename failed (legacy copy, cover read, save staging)
//! - `Save`: persisting the mutated tag failed (on-disk file is unchanged)
//! - `WordList`: the forbidden word list could not be loaded (startup only)
//!
//! Heuristic misses (unparsable track numbers, unusable paths) are not errors at all;
//! those fields simply stay empty/zero.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleanError {
    #[error("ID3v2 parsing failed for '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },

    #[error("{context} for '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to save ID3v2 tags to '{}': {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to read forbidden word list '{}': {source}", .path.display())]
    WordList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for everything that touches a single file.
pub type CleanResult<T> = Result<T, CleanError>;

impl CleanError {
    pub(crate) fn io(path: &Path, context: &'static str) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| CleanError::Io {
            path,
            context,
            source,
        }
    }

    pub(crate) fn save<E>(path: &Path, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        CleanError::Save {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    /// The file this error belongs to.
    pub fn path(&self) -> &Path {
        match self {
            CleanError::Parse { path, .. }
            | CleanError::Io { path, .. }
            | CleanError::Save { path, .. }
            | CleanError::WordList { path, .. } => path,
        }
    }
}
