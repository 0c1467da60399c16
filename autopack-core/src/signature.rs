//! Binary signature ("magic number") sniffing.
//!
//! Signatures are kept in a single ordered table and evaluated first to last;
//! the first match wins. When no table entry matches, a legacy tar heuristic
//! inspects the 100-byte name field of the first 512-byte block.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::debug;

use crate::kind::FileKind;

/// Number of bytes inspected from the start of a file (one tar block).
pub const PROBE_SIZE: usize = 512;

/// Minimum number of bytes a file must provide before any signature applies.
pub const MIN_HEADER_LEN: usize = 4;

/// Byte offset of the POSIX `ustar` marker inside a tar header.
pub const USTAR_OFFSET: usize = 257;

/// Length of the name field at the start of a tar header.
const TAR_NAME_FIELD_LEN: usize = 100;

/// One entry of the signature table.
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    /// Kind reported when one of `magics` matches
    pub kind: FileKind,
    /// Offset of the magic bytes from the start of the file
    pub offset: usize,
    /// Alternative byte patterns; any one of them matches
    pub magics: &'static [&'static [u8]],
}

impl Signature {
    /// Returns `true` if `header` carries one of this signature's patterns.
    pub fn matches(&self, header: &[u8]) -> bool {
        self.magics.iter().any(|magic| {
            header
                .get(self.offset..self.offset + magic.len())
                .is_some_and(|window| window == *magic)
        })
    }
}

/// Ordered signature table.
///
/// Gzip, bzip2 and xz streams are reported as their tar-wrapped variants even
/// when the payload is not a tarball; tool selection downstream relies on it.
pub const SIGNATURES: &[Signature] = &[
    Signature {
        kind: FileKind::Zip,
        offset: 0,
        magics: &[b"PK\x03\x04", b"PK\x05\x06", b"PK\x01\x02"],
    },
    Signature {
        kind: FileKind::Rar,
        offset: 0,
        magics: &[b"Rar!"],
    },
    Signature {
        kind: FileKind::SevenZip,
        offset: 0,
        magics: &[&[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C]],
    },
    Signature {
        kind: FileKind::TarGz,
        offset: 0,
        magics: &[&[0x1F, 0x8B]],
    },
    Signature {
        kind: FileKind::TarBz2,
        offset: 0,
        magics: &[b"BZh"],
    },
    Signature {
        kind: FileKind::TarXz,
        offset: 0,
        magics: &[&[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00]],
    },
    Signature {
        kind: FileKind::Lz4,
        offset: 0,
        magics: &[&[0x04, 0x22, 0x4D, 0x18]],
    },
    Signature {
        kind: FileKind::Zstd,
        offset: 0,
        magics: &[&[0x28, 0xB5, 0x2F, 0xFD], &[0x22, 0xB5, 0x2F, 0xFD]],
    },
    Signature {
        kind: FileKind::Tar,
        offset: USTAR_OFFSET,
        magics: &[b"ustar"],
    },
];

/// Reads up to [`PROBE_SIZE`] bytes from `input` without requiring EOF.
///
/// # Errors
///
/// Returns an error if reading from `input` fails.
pub fn read_probe(input: &mut impl Read) -> io::Result<Vec<u8>> {
    let mut probe = Vec::with_capacity(PROBE_SIZE);
    let mut tmp = [0_u8; PROBE_SIZE];

    while probe.len() < PROBE_SIZE {
        let offset = probe.len();
        let n = match input.read(&mut tmp[offset..]) {
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        if n == 0 {
            break;
        }
        probe.extend_from_slice(&tmp[offset..offset + n]);
    }

    Ok(probe)
}

/// Classifies an already-read probe buffer.
///
/// Returns [`FileKind::Unknown`] when nothing matches.
pub fn classify(probe: &[u8]) -> FileKind {
    if probe.len() < MIN_HEADER_LEN {
        return FileKind::Unknown;
    }

    if let Some(signature) = SIGNATURES.iter().find(|sig| sig.matches(probe)) {
        return signature.kind;
    }

    if looks_like_legacy_tar(probe) {
        return FileKind::Tar;
    }

    FileKind::Unknown
}

/// Heuristic for pre-POSIX tar headers that lack the `ustar` marker.
///
/// Requires a full 512-byte block whose name field holds at least one
/// non-NUL byte, with every non-NUL byte printable ASCII (32..=126).
fn looks_like_legacy_tar(probe: &[u8]) -> bool {
    if probe.len() < PROBE_SIZE {
        return false;
    }

    let name = &probe[..TAR_NAME_FIELD_LEN];
    let mut has_name = false;
    for &byte in name.iter().filter(|&&b| b != 0) {
        if !(32..=126).contains(&byte) {
            return false;
        }
        has_name = true;
    }
    has_name
}

/// Detects the archive kind of a byte stream by its signature.
///
/// # Errors
///
/// Returns an error if reading from `input` fails.
pub fn detect_by_signature(mut input: impl Read) -> io::Result<FileKind> {
    let probe = read_probe(&mut input)?;
    Ok(classify(&probe))
}

/// Detects the archive kind of the file at `path` by its signature.
///
/// A file that cannot be opened or read is reported as
/// [`FileKind::Unknown`] so that extension rules can still apply.
pub fn recognize_by_signature(path: &Path) -> FileKind {
    let result = File::open(path).and_then(detect_by_signature);
    match result {
        Ok(kind) => kind,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "signature probe failed");
            FileKind::Unknown
        }
    }
}
