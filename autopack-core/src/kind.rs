//! Shared vocabulary: what a path is, and what the user wants done with it.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Resolved classification of a filesystem path.
///
/// A path resolves to exactly one kind per invocation; the value is `Copy`
/// and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// A regular file that is not a recognized archive
    RegularFile,
    /// A directory
    Directory,
    /// Uncompressed tarball
    Tar,
    /// Gzip-wrapped tarball
    TarGz,
    /// Bzip2-wrapped tarball
    TarBz2,
    /// Xz-wrapped tarball
    TarXz,
    /// ZIP archive (including split `.z##` parts)
    Zip,
    /// RAR archive
    Rar,
    /// 7-Zip archive
    SevenZip,
    /// LZ4 frame
    Lz4,
    /// Zstandard frame
    Zstd,
    /// XAR archive
    Xar,
    /// Nothing matched
    Unknown,
}

/// Direction of the requested operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Build an archive from files or directories
    Compress,
    /// Extract an archive into a directory
    Decompress,
}

impl FileKind {
    /// Every archive kind, in menu order.
    pub const ARCHIVES: [FileKind; 10] = [
        FileKind::TarGz,
        FileKind::Zip,
        FileKind::SevenZip,
        FileKind::Tar,
        FileKind::TarBz2,
        FileKind::TarXz,
        FileKind::Rar,
        FileKind::Lz4,
        FileKind::Zstd,
        FileKind::Xar,
    ];

    /// Returns `true` for the genuine archive variants.
    ///
    /// `RegularFile`, `Directory` and `Unknown` are not archives.
    pub fn is_archive(self) -> bool {
        !matches!(
            self,
            FileKind::RegularFile | FileKind::Directory | FileKind::Unknown
        )
    }

    /// Returns `true` for the tarball family (`tar`, `tar.gz`, `tar.bz2`, `tar.xz`).
    pub fn is_tar_family(self) -> bool {
        matches!(
            self,
            FileKind::Tar | FileKind::TarGz | FileKind::TarBz2 | FileKind::TarXz
        )
    }

    /// Returns `true` when the external tool for this kind can encrypt.
    pub fn supports_password(self) -> bool {
        matches!(self, FileKind::Zip | FileKind::SevenZip | FileKind::Rar)
    }

    /// Human-readable name used in prompts and diagnostics.
    pub fn display_name(self) -> &'static str {
        match self {
            FileKind::RegularFile => "Regular File",
            FileKind::Directory => "Directory",
            FileKind::Tar => "TAR Archive",
            FileKind::TarGz => "TAR.GZ Archive",
            FileKind::TarBz2 => "TAR.BZ2 Archive",
            FileKind::TarXz => "TAR.XZ Archive",
            FileKind::Zip => "ZIP Archive",
            FileKind::Rar => "RAR Archive",
            FileKind::SevenZip => "7Z Archive",
            FileKind::Lz4 => "LZ4 Archive",
            FileKind::Zstd => "ZSTD Archive",
            FileKind::Xar => "XAR Archive",
            FileKind::Unknown => "Unknown Type",
        }
    }

    /// Canonical format string accepted by [`FileKind::from_str`], if any.
    pub fn format_name(self) -> Option<&'static str> {
        Some(match self {
            FileKind::Tar => "tar",
            FileKind::TarGz => "tar.gz",
            FileKind::TarBz2 => "tar.bz2",
            FileKind::TarXz => "tar.xz",
            FileKind::Zip => "zip",
            FileKind::Rar => "rar",
            FileKind::SevenZip => "7z",
            FileKind::Lz4 => "lz4",
            FileKind::Zstd => "zstd",
            FileKind::Xar => "xar",
            FileKind::RegularFile | FileKind::Directory | FileKind::Unknown => return None,
        })
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for FileKind {
    type Err = Error;

    /// Parses an explicit format override, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zip" => Ok(FileKind::Zip),
            "7z" => Ok(FileKind::SevenZip),
            "tar" => Ok(FileKind::Tar),
            "tar.gz" | "tgz" => Ok(FileKind::TarGz),
            "tar.bz2" | "tbz2" => Ok(FileKind::TarBz2),
            "tar.xz" | "txz" => Ok(FileKind::TarXz),
            "rar" => Ok(FileKind::Rar),
            "lz4" => Ok(FileKind::Lz4),
            "zstd" | "zst" => Ok(FileKind::Zstd),
            "xar" => Ok(FileKind::Xar),
            _ => Err(Error::UnknownFormat(format!("Invalid format specified: {s}"))),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Compress => f.write_str("Compress"),
            OperationKind::Decompress => f.write_str("Decompress"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_aliases_case_insensitively() {
        assert_eq!("TGZ".parse::<FileKind>().unwrap(), FileKind::TarGz);
        assert_eq!("tbz2".parse::<FileKind>().unwrap(), FileKind::TarBz2);
        assert_eq!("Txz".parse::<FileKind>().unwrap(), FileKind::TarXz);
        assert_eq!("zst".parse::<FileKind>().unwrap(), FileKind::Zstd);
        assert_eq!("ZSTD".parse::<FileKind>().unwrap(), FileKind::Zstd);
        assert_eq!("7Z".parse::<FileKind>().unwrap(), FileKind::SevenZip);
    }

    #[test]
    fn parse_rejects_unknown_format() {
        let err = "cab".parse::<FileKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownFormat(ref info) if info.contains("cab")));
        assert!("".parse::<FileKind>().is_err());
    }

    #[test]
    fn format_name_round_trips_for_every_archive() {
        for kind in FileKind::ARCHIVES {
            let name = kind.format_name().unwrap();
            assert_eq!(name.parse::<FileKind>().unwrap(), kind);
        }
        assert_eq!(FileKind::Directory.format_name(), None);
    }

    #[test]
    fn archive_classification() {
        assert!(FileKind::Zip.is_archive());
        assert!(!FileKind::RegularFile.is_archive());
        assert!(!FileKind::Directory.is_archive());
        assert!(!FileKind::Unknown.is_archive());
        assert!(FileKind::TarXz.is_tar_family());
        assert!(!FileKind::Zip.is_tar_family());
    }
}
