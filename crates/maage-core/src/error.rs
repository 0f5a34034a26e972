//! Error types for maage-core

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in maage-core
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed section structure in a cheat sheet
    #[error("Cheat sheet parse error at line {line}: {message} (line: {content:?})")]
    Parse {
        /// 1-based line number of the offending line
        line: usize,
        /// Raw text of the offending line (empty at end of input)
        content: String,
        message: String,
    },

    /// Update target section is absent
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    /// Column letters outside A-Z, or empty
    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    /// Column range with a bad separator count or descending bounds
    #[error("Invalid column range: {0}")]
    InvalidRange(String),

    /// Backing resource unreadable or unwritable
    #[error("IO error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn parse<S: Into<String>>(line: usize, content: &str, message: S) -> Self {
        Error::Parse {
            line,
            content: content.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
