//! Errors surfaced to callers.
//!
//! Decoding problems never show up here: a chunk that fails to convert is
//! replaced by `?` inside the stream. Only failures to reach the file, or to
//! keep reading it, are reported.

use std::io;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

/// The file could not be opened, or its detection prefix could not be read.
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("cannot find file '{}'", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("permission denied reading '{}'", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl OpenError {
    pub(crate) fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => OpenError::NotFound { path, source },
            io::ErrorKind::PermissionDenied => OpenError::PermissionDenied { path, source },
            _ => OpenError::Io { path, source },
        }
    }

    /// The path that failed to open.
    pub fn path(&self) -> &Path {
        match self {
            OpenError::NotFound { path, .. }
            | OpenError::PermissionDenied { path, .. }
            | OpenError::Io { path, .. } => path,
        }
    }
}

/// Failure of [`read_text`](crate::read_text).
#[derive(Debug, thiserror::Error)]
pub enum ReadTextError {
    #[error(transparent)]
    Open(#[from] OpenError),
    #[error("error reading '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A file detected as UTF-8 from its prefix turned out to contain
    /// invalid UTF-8 further in.
    #[error("'{}' contains invalid UTF-8 data", path.display())]
    InvalidUtf8 {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },
}
