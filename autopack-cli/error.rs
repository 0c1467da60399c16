//! Error types and process exit codes for the autopack CLI.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::messages::Message;

/// Process exit codes.
pub mod exit_code {
    /// Finished, or cancelled by the user
    pub const SUCCESS: i32 = 0;
    /// Missing or malformed command-line arguments
    pub const MISSING_ARGS: i32 = 1;
    /// Source path missing or unusable
    pub const INVALID_SOURCE: i32 = 2;
    /// Target path unusable
    pub const INVALID_TARGET: i32 = 3;
    /// Source and target are the same entity
    pub const SAME_PATH: i32 = 4;
    /// Archive format could not be determined or is unsupported
    pub const UNKNOWN_FORMAT: i32 = 5;
    /// Required external tool is not installed
    pub const TOOL_NOT_FOUND: i32 = 6;
    /// External tool exited unsuccessfully
    pub const OPERATION_FAILED: i32 = 7;
    /// Access to a path was denied
    pub const PERMISSION_DENIED: i32 = 8;
    /// Anything else, including a closed input stream
    pub const UNKNOWN: i32 = 99;
}

/// Main error type for autopack CLI operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Required positional arguments were not supplied
    #[error("Missing arguments. {0}")]
    MissingArgs(String),

    /// Recognition, filtering or conflict resolution failed
    #[error(transparent)]
    Core(#[from] autopack_core::Error),

    /// External tool is not on `PATH`
    #[error("Required tool not found: {tool}. Please ensure it is installed and in your system's PATH.")]
    ToolNotFound {
        /// Program name that was looked up
        tool: String,
    },

    /// Split ZIP extraction needs `7z`, which is missing
    #[error("Split ZIP archives require '7z' (p7zip) for extraction. Please install p7zip-full.")]
    SplitZipRequires7z,

    /// External tool returned a non-zero exit code
    #[error("Operation failed (command: {command}, exit code: {code}). Might be due to a wrong password.")]
    OperationFailed {
        /// Program that was run
        command: String,
        /// Its exit code, or -1 when killed by a signal
        code: i32,
    },

    /// External tool could not be started
    #[error("Failed to start '{command}': {source}")]
    Spawn {
        /// Program that was run
        command: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Access to a path was denied
    #[error("Permission denied. {}", path.display())]
    PermissionDenied {
        /// Path that could not be accessed
        path: PathBuf,
    },
}

/// Specialized `Result` type for autopack CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use autopack_core::Error as Core;

        match self {
            Error::MissingArgs(_) => exit_code::MISSING_ARGS,
            Error::Core(Core::InvalidSource { .. }) => exit_code::INVALID_SOURCE,
            Error::Core(Core::InvalidTarget { .. }) => exit_code::INVALID_TARGET,
            Error::Core(Core::SamePath { .. }) => exit_code::SAME_PATH,
            Error::Core(Core::UnknownFormat(_)) => exit_code::UNKNOWN_FORMAT,
            Error::Core(Core::Io { source, .. })
                if source.kind() == io::ErrorKind::PermissionDenied =>
            {
                exit_code::PERMISSION_DENIED
            }
            Error::Core(Core::InputClosed | Core::Io { .. }) => exit_code::UNKNOWN,
            Error::ToolNotFound { .. } | Error::SplitZipRequires7z => exit_code::TOOL_NOT_FOUND,
            Error::OperationFailed { .. } | Error::Spawn { .. } => exit_code::OPERATION_FAILED,
            Error::PermissionDenied { .. } => exit_code::PERMISSION_DENIED,
        }
    }

    /// Converts a filesystem error on `path`, keeping permission failures distinct.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::PermissionDenied {
            Error::PermissionDenied { path }
        } else {
            Error::Core(autopack_core::Error::io(path, source))
        }
    }
}

/// Formats an error as the single line printed on stderr.
///
/// # Parameters
///
/// * `err` - The error returned by [`crate::run`]
///
/// # Returns
///
/// `Error: <message>` for anticipated failures, or the unexpected-error line
/// for failures that have no dedicated exit code.
pub fn format_error_for_stderr(err: &Error) -> String {
    let message = err.to_string();
    let line = if err.exit_code() == exit_code::UNKNOWN {
        Message::UnexpectedError
    } else {
        Message::ErrorLine
    };
    line.render(&[("MESSAGE", &message)])
}
