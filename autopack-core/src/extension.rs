//! Extension-based recognition.
//!
//! Used as the fallback when a file carries no known signature, and as the
//! only source of the target-kind hint (the target usually does not exist yet).

use std::ffi::OsStr;
use std::path::Path;

use crate::kind::FileKind;

/// Single extensions mapped straight to a kind (lowercase, without the dot).
const DIRECT_EXTENSIONS: &[(&str, FileKind)] = &[
    ("tar", FileKind::Tar),
    ("zip", FileKind::Zip),
    ("rar", FileKind::Rar),
    ("7z", FileKind::SevenZip),
    ("lz4", FileKind::Lz4),
    ("zst", FileKind::Zstd),
    ("zstd", FileKind::Zstd),
    ("xar", FileKind::Xar),
    ("tgz", FileKind::TarGz),
    ("tbz2", FileKind::TarBz2),
    ("tbz", FileKind::TarBz2),
    ("txz", FileKind::TarXz),
];

/// Outer extensions that form a tarball when the stem itself ends in `.tar`.
const TAR_COMPOUND_EXTENSIONS: &[(&str, FileKind)] = &[
    ("gz", FileKind::TarGz),
    ("bz2", FileKind::TarBz2),
    ("xz", FileKind::TarXz),
];

/// Returns the lowercase extension of `path` (without the dot), if any.
pub(crate) fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(OsStr::to_str)
        .filter(|ext| !ext.is_empty())
        .map(str::to_ascii_lowercase)
}

/// Checks whether `ext` (without the dot) names a split ZIP part: `z` followed
/// by exactly two ASCII digits, case-insensitive.
pub fn is_split_zip_extension(ext: &str) -> bool {
    let bytes = ext.as_bytes();
    bytes.len() == 3
        && bytes[0].eq_ignore_ascii_case(&b'z')
        && bytes[1].is_ascii_digit()
        && bytes[2].is_ascii_digit()
}

/// Determines the archive kind of `path` from its extension alone.
///
/// Tries, in order: the direct single-extension table, the split ZIP part
/// pattern (`.z01`..`.z99`), then compound `.tar.<outer>` extensions.
///
/// # Returns
///
/// The matching archive kind, or [`FileKind::Unknown`].
pub fn recognize_by_extension(path: &Path) -> FileKind {
    let Some(ext) = lowercase_extension(path) else {
        return FileKind::Unknown;
    };

    if let Some(&(_, kind)) = DIRECT_EXTENSIONS.iter().find(|(known, _)| *known == ext) {
        return kind;
    }

    if is_split_zip_extension(&ext) {
        return FileKind::Zip;
    }

    let stem_is_tar = path
        .file_stem()
        .map(Path::new)
        .and_then(lowercase_extension)
        .is_some_and(|stem_ext| stem_ext == "tar");
    if stem_is_tar {
        if let Some(&(_, kind)) = TAR_COMPOUND_EXTENSIONS
            .iter()
            .find(|(outer, _)| *outer == ext)
        {
            return kind;
        }
    }

    FileKind::Unknown
}
