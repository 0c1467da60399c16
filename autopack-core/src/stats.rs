//! Performance statistics for a single archiving run.

use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::debug;
use walkdir::WalkDir;

/// Sizes and timing collected around one tool invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OperationStats {
    /// Total size of the inputs in bytes
    pub original_size: u64,
    /// Size of the produced archive in bytes
    pub compressed_size: u64,
    /// Wall-clock duration of the tool run
    pub elapsed: Duration,
    /// Thread count passed to the tool
    pub threads: u32,
}

impl OperationStats {
    /// Space saved as a percentage of the original size.
    ///
    /// # Returns
    ///
    /// `(1 - compressed / original) * 100`, or `0.0` when nothing was measured.
    /// Negative values mean the archive is larger than its inputs.
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        if self.original_size == 0 {
            0.0
        } else {
            (1.0 - self.compressed_size as f64 / self.original_size as f64) * 100.0
        }
    }

    /// Bytes saved by compressing; zero when the archive grew.
    pub fn saved_bytes(&self) -> u64 {
        self.original_size.saturating_sub(self.compressed_size)
    }

    /// Whether both sizes are known, so a ratio is worth reporting.
    pub fn has_sizes(&self) -> bool {
        self.original_size > 0 && self.compressed_size > 0
    }
}

/// Size of `path` in bytes.
///
/// Regular files report their length; directories report the sum of every
/// regular file below them. Entries that cannot be read count as zero.
pub fn path_size(path: &Path) -> u64 {
    let Ok(metadata) = fs::metadata(path) else {
        return 0;
    };

    if metadata.is_file() {
        return metadata.len();
    }

    WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry while sizing");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}

/// Combined size of every path in `sources`.
pub fn sources_size<P: AsRef<Path>>(sources: &[P]) -> u64 {
    sources.iter().map(|source| path_size(source.as_ref())).sum()
}
