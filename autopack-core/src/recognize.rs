//! Source classification and operation inference.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::extension::recognize_by_extension;
use crate::kind::{FileKind, OperationKind};
use crate::signature::recognize_by_signature;

/// Outcome of [`recognize`]: what the source is and what should happen to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecognitionResult {
    /// Resolved kind of the source path
    pub source_kind: FileKind,
    /// Desired archive kind derived from the target extension (compression only)
    pub target_hint: FileKind,
    /// Inferred operation
    pub operation: OperationKind,
}

impl RecognitionResult {
    /// Applies an explicit format override.
    ///
    /// For compression the override replaces the target hint; for
    /// decompression it replaces the detected source kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFormat`] if `format` is not a known format name.
    pub fn with_override(mut self, format: &str) -> Result<Self> {
        let forced: FileKind = format.parse()?;
        match self.operation {
            OperationKind::Compress => self.target_hint = forced,
            OperationKind::Decompress => self.source_kind = forced,
        }
        debug!(format, kind = ?forced, operation = %self.operation, "format override applied");
        Ok(self)
    }

    /// Returns the archive kind the dispatcher should work with.
    ///
    /// That is the target hint when compressing and the source kind when
    /// decompressing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFormat`] when compressing without a known
    /// target format.
    pub fn archive_kind(&self) -> Result<FileKind> {
        match self.operation {
            OperationKind::Compress if self.target_hint.is_archive() => Ok(self.target_hint),
            OperationKind::Compress => Err(Error::UnknownFormat(
                "Target format could not be determined. Please specify --format or use an archive extension in the target path."
                    .to_string(),
            )),
            OperationKind::Decompress => Ok(self.source_kind),
        }
    }
}

/// Classifies `path` as a directory, a plain file, or a specific archive.
///
/// For regular files the binary signature is consulted first; the extension
/// is only used when the signature is inconclusive. Directories are never
/// inspected.
///
/// # Errors
///
/// Returns [`Error::InvalidSource`] if `path` does not exist or is neither a
/// regular file nor a directory.
pub fn recognize_source_type(path: &Path) -> Result<FileKind> {
    let metadata = fs::metadata(path).map_err(|err| Error::source_unavailable(path, &err))?;

    if metadata.is_dir() {
        return Ok(FileKind::Directory);
    }

    if !metadata.is_file() {
        return Err(Error::InvalidSource {
            path: path.to_path_buf(),
            reason: Some("not a regular file or directory".to_string()),
        });
    }

    let mut kind = recognize_by_signature(path);
    if kind == FileKind::Unknown {
        kind = recognize_by_extension(path);
    }
    if kind == FileKind::Unknown {
        kind = FileKind::RegularFile;
    }

    debug!(path = %path.display(), ?kind, "source recognized");
    Ok(kind)
}

/// Resolves the source kind and infers the intended operation.
///
/// # Parameters
///
/// * `source` - Path to inspect (must exist)
/// * `target` - Desired target; only its extension is consulted
///
/// # Errors
///
/// - [`Error::InvalidSource`] if the source is missing or of an unsupported type
/// - [`Error::InvalidTarget`] if the source is an archive and the target
///   exists but is not a directory
pub fn recognize(source: &Path, target: &Path) -> Result<RecognitionResult> {
    let source_kind = recognize_source_type(source)?;
    let target_hint = recognize_by_extension(target);

    let result = if matches!(source_kind, FileKind::Directory | FileKind::RegularFile) {
        RecognitionResult {
            source_kind,
            target_hint: if target_hint.is_archive() {
                target_hint
            } else {
                FileKind::Unknown
            },
            operation: OperationKind::Compress,
        }
    } else {
        if target.exists() && !target.is_dir() {
            return Err(Error::invalid_target(
                target,
                "Target for decompression must be a directory.",
            ));
        }
        RecognitionResult {
            source_kind,
            target_hint,
            operation: OperationKind::Decompress,
        }
    };

    debug!(
        source = %source.display(),
        target = %target.display(),
        operation = %result.operation,
        "operation inferred"
    );
    Ok(result)
}

/// Fails when `source` and `target` both exist and name the same entity.
///
/// # Errors
///
/// Returns [`Error::SamePath`] when both paths canonicalize to the same location.
pub fn ensure_distinct(source: &Path, target: &Path) -> Result<()> {
    if !source.exists() || !target.exists() {
        return Ok(());
    }

    match (fs::canonicalize(source), fs::canonicalize(target)) {
        (Ok(a), Ok(b)) if a == b => Err(Error::SamePath {
            source_path: source.to_path_buf(),
            target_path: target.to_path_buf(),
        }),
        _ => Ok(()),
    }
}
