//! Error types for format recognition and target resolution.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias using the crate-level [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure modes surfaced by the recognition and resolution core.
///
/// Every variant carries enough context (offending path, reason text) to be
/// rendered as a single human-readable line.
#[derive(Debug, Error)]
pub enum Error {
    /// Source path is missing, or is neither a regular file nor a directory.
    #[error("Source path '{}' does not exist or is invalid.{}", path.display(), fmt_reason(reason.as_deref()))]
    InvalidSource {
        /// Offending source path
        path: PathBuf,
        /// Optional explanation appended to the message
        reason: Option<String>,
    },

    /// Target path cannot be used for the requested operation.
    #[error("Invalid target path '{}'. {reason}", path.display())]
    InvalidTarget {
        /// Offending target path
        path: PathBuf,
        /// Why the target was rejected (often the OS error text)
        reason: String,
    },

    /// No archive kind could be determined where one is required.
    #[error("Unrecognized file format or ambiguous operation. {0}")]
    UnknownFormat(String),

    /// Source and target refer to the same filesystem entity.
    #[error("Source and target paths cannot be the same ('{}' and '{}')", source_path.display(), target_path.display())]
    SamePath {
        /// Source as given by the caller
        source_path: PathBuf,
        /// Target as given by the caller
        target_path: PathBuf,
    },

    /// The interactive input stream ended before a decision was made.
    #[error("Input stream closed. Operation canceled.")]
    InputClosed,

    /// Filesystem failure tied to a specific path.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

fn fmt_reason(reason: Option<&str>) -> String {
    reason.map(|r| format!(" {r}")).unwrap_or_default()
}

impl Error {
    /// Shorthand for an [`Error::InvalidSource`] without a reason.
    pub fn invalid_source(path: impl Into<PathBuf>) -> Self {
        Error::InvalidSource {
            path: path.into(),
            reason: None,
        }
    }

    /// [`Error::InvalidSource`] for a failed probe of `path`.
    ///
    /// A missing path keeps the plain message; any other failure carries
    /// the OS error text as the reason.
    pub fn source_unavailable(path: impl Into<PathBuf>, err: &io::Error) -> Self {
        let reason = (err.kind() != io::ErrorKind::NotFound).then(|| err.to_string());
        Error::InvalidSource {
            path: path.into(),
            reason,
        }
    }

    /// Wraps an [`io::Error`] raised while accessing `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Shorthand for an [`Error::InvalidTarget`].
    pub fn invalid_target(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::InvalidTarget {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
