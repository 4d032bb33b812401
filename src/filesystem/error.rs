use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use snafu::{IntoError, Snafu};

/// Failure of a filesystem operation. Every variant carries the path that failed.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FsError {
    #[snafu(display("No such file or directory: {}", path.display()))]
    NotFound { path: PathBuf, source: io::Error },
    #[snafu(display("Permission denied: {}", path.display()))]
    PermissionDenied { path: PathBuf, source: io::Error },
    #[snafu(display("Not a directory: {}", path.display()))]
    NotADirectory { path: PathBuf, source: io::Error },
    #[snafu(display("I/O failure on {}", path.display()))]
    Io { path: PathBuf, source: io::Error },
    #[snafu(display("Cannot fingerprint a directory: {}", path.display()))]
    DirectoryFingerprint { path: PathBuf },
    #[snafu(display("Invalid name pattern '{}'", pattern))]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

impl FsError {
    /// Sorts an OS error into the taxonomy by its kind.
    pub(crate) fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            ErrorKind::NotFound => NotFoundSnafu { path }.into_error(source),
            ErrorKind::PermissionDenied => PermissionDeniedSnafu { path }.into_error(source),
            ErrorKind::NotADirectory => NotADirectorySnafu { path }.into_error(source),
            _ => IoSnafu { path }.into_error(source),
        }
    }

    /// The path the failing operation was working on.
    pub fn path(&self) -> Option<&Path> {
        match self {
            FsError::NotFound { path, .. }
            | FsError::PermissionDenied { path, .. }
            | FsError::NotADirectory { path, .. }
            | FsError::Io { path, .. }
            | FsError::DirectoryFingerprint { path } => Some(path),
            FsError::InvalidPattern { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound { .. })
    }
}
