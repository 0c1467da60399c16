//! Per-format argument tables for the external archiving tools.
//!
//! Nothing here touches the filesystem or spawns a process; the functions
//! only translate an archive kind plus paths into a [`ToolInvocation`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use autopack_core::{Error as CoreError, FileKind};

use crate::error::Result;

/// A fully assembled external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Program name, looked up on `PATH`
    pub program: &'static str,
    /// Arguments in order
    pub args: Vec<OsString>,
    /// Directory the program runs in, or the current one
    pub working_dir: Option<PathBuf>,
}

impl ToolInvocation {
    fn new(program: &'static str) -> Self {
        Self {
            program,
            args: Vec::new(),
            working_dir: None,
        }
    }

    fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

/// Everything needed to build a compression command.
#[derive(Debug, Clone, Copy)]
pub struct CompressRequest<'a> {
    /// Archive format to produce
    pub kind: FileKind,
    /// Archive path, absolute
    pub target: &'a Path,
    /// Items to archive, relative to `working_dir`
    pub items: &'a [PathBuf],
    /// Directory the tool runs in
    pub working_dir: &'a Path,
    /// Archive password
    pub password: Option<&'a str>,
    /// Compression level
    pub level: Option<u32>,
    /// Thread hint
    pub threads: Option<u32>,
}

/// `-<flags>` for the tar family.
fn tar_flags(kind: FileKind, create: bool) -> Option<&'static str> {
    let flags = match (kind, create) {
        (FileKind::Tar, true) => "-cf",
        (FileKind::TarGz, true) => "-czf",
        (FileKind::TarBz2, true) => "-cjf",
        (FileKind::TarXz, true) => "-cJf",
        (FileKind::Tar, false) => "-xf",
        (FileKind::TarGz, false) => "-xzf",
        (FileKind::TarBz2, false) => "-xjf",
        (FileKind::TarXz, false) => "-xJf",
        _ => return None,
    };
    Some(flags)
}

fn single_item<'a>(items: &'a [PathBuf], tool: &str) -> Result<&'a PathBuf> {
    match items {
        [item] => Ok(item),
        _ => Err(CoreError::UnknownFormat(format!(
            "Multiple sources are not supported for {tool} compression."
        ))
        .into()),
    }
}

/// Builds the compression command for `request.kind`.
///
/// The password is not part of any tar command; callers warn about it.
///
/// # Errors
///
/// Returns [`CoreError::UnknownFormat`] for formats that cannot be created
/// (RAR and non-archives), or when a single-stream format (LZ4, ZSTD) is
/// given more than one item.
pub fn compress_command(request: &CompressRequest<'_>) -> Result<ToolInvocation> {
    let CompressRequest {
        kind,
        target,
        items,
        working_dir,
        password,
        level,
        threads,
    } = *request;

    let invocation = match kind {
        FileKind::Tar | FileKind::TarGz | FileKind::TarBz2 | FileKind::TarXz => {
            let flags = tar_flags(kind, true).unwrap_or("-cf");
            ToolInvocation::new("tar").arg(flags).arg(target).args(items)
        }
        FileKind::Zip => {
            let mut zip = ToolInvocation::new("zip");
            if let Some(password) = password {
                zip = zip.arg("-P").arg(password);
            }
            if let Some(level) = level {
                zip = zip.arg(format!("-{level}"));
            }
            zip.arg("-r").arg(target).args(items)
        }
        FileKind::SevenZip => {
            let mut seven = ToolInvocation::new("7z").arg("a");
            if let Some(password) = password {
                seven = seven.arg(format!("-p{password}"));
            }
            if let Some(level) = level {
                seven = seven.arg(format!("-mx={level}"));
            }
            seven.arg(target).args(items)
        }
        FileKind::Lz4 => {
            let item = single_item(items, "lz4")?;
            let mut lz4 = ToolInvocation::new("lz4");
            if let Some(level) = level {
                lz4 = lz4.arg(format!("-{level}"));
            }
            lz4.arg("-r").arg(item).arg(target)
        }
        FileKind::Zstd => {
            let item = single_item(items, "zstd")?;
            let mut zstd = ToolInvocation::new("zstd");
            if let Some(level) = level {
                zstd = zstd.arg(format!("-{level}"));
            }
            if let Some(threads) = threads {
                zstd = zstd.arg(format!("-T{threads}"));
            }
            zstd.arg("-r").arg(item).arg("-o").arg(target)
        }
        FileKind::Xar => ToolInvocation::new("xar").arg("-cf").arg(target).args(items),
        _ => {
            return Err(CoreError::UnknownFormat(
                "Unsupported target format for compression.".to_string(),
            )
            .into())
        }
    };

    Ok(invocation.in_dir(working_dir))
}

/// Builds the extraction command for an archive of `kind`.
///
/// # Parameters
///
/// * `kind` - Archive kind of `source`
/// * `source` - Archive to extract (the main `.zip` for split archives)
/// * `target_dir` - Existing destination directory
/// * `password` - Archive password
/// * `split_zip` - Route ZIP extraction through `7z`, which understands split sets
///
/// # Errors
///
/// Returns [`CoreError::UnknownFormat`] when `kind` is not an archive.
pub fn decompress_command(
    kind: FileKind,
    source: &Path,
    target_dir: &Path,
    password: Option<&str>,
    split_zip: bool,
) -> Result<ToolInvocation> {
    let invocation = match kind {
        FileKind::Tar | FileKind::TarGz | FileKind::TarBz2 | FileKind::TarXz => {
            let flags = tar_flags(kind, false).unwrap_or("-xf");
            ToolInvocation::new("tar")
                .arg(flags)
                .arg(source)
                .arg("-C")
                .arg(target_dir)
        }
        FileKind::Zip if split_zip => seven_zip_extract(source, target_dir, password),
        FileKind::Zip => {
            let mut unzip = ToolInvocation::new("unzip");
            if let Some(password) = password {
                unzip = unzip.arg("-P").arg(password);
            }
            unzip.arg("-o").arg(source).arg("-d").arg(target_dir)
        }
        FileKind::Rar => {
            let mut unrar = ToolInvocation::new("unrar").arg("x");
            if let Some(password) = password {
                unrar = unrar.arg(format!("-p{password}"));
            }
            unrar.arg("-o+").arg(source).arg(target_dir)
        }
        FileKind::SevenZip => seven_zip_extract(source, target_dir, password),
        FileKind::Lz4 => ToolInvocation::new("lz4").arg("-d").arg(source).arg(target_dir),
        FileKind::Zstd => ToolInvocation::new("zstd")
            .arg("-d")
            .arg(source)
            .arg("-o")
            .arg(target_dir),
        FileKind::Xar => ToolInvocation::new("xar")
            .arg("-xf")
            .arg(source)
            .arg("-C")
            .arg(target_dir),
        _ => {
            return Err(CoreError::UnknownFormat(
                "Unsupported source format for decompression.".to_string(),
            )
            .into())
        }
    };

    Ok(invocation)
}

fn seven_zip_extract(source: &Path, target_dir: &Path, password: Option<&str>) -> ToolInvocation {
    let mut out_dir = OsString::from("-o");
    out_dir.push(target_dir);

    let mut seven = ToolInvocation::new("7z").arg("x");
    if let Some(password) = password {
        seven = seven.arg(format!("-p{password}"));
    }
    seven.arg(source).arg(out_dir).arg("-y")
}

/// Builds the integrity test command for `archive`.
///
/// Returns `None` for formats without a supported test mode.
pub fn verify_command(kind: FileKind, archive: &Path) -> Option<ToolInvocation> {
    let invocation = match kind {
        FileKind::Tar | FileKind::TarGz | FileKind::TarBz2 | FileKind::TarXz => {
            ToolInvocation::new("tar").arg("-tf").arg(archive)
        }
        FileKind::Zip => ToolInvocation::new("unzip").arg("-t").arg(archive),
        FileKind::SevenZip => ToolInvocation::new("7z").arg("t").arg(archive),
        _ => return None,
    };
    Some(invocation)
}
