//! Compression, extraction and verification orchestration.
//!
//! These functions turn a resolved request into a [`ToolInvocation`], run it
//! through [`crate::process`], and report progress through the interaction
//! boundary.

use std::env;
use std::fs;
use std::path::{is_separator, Path, PathBuf};
use std::time::Instant;

use autopack_core::split_zip::{find_split_zip_main, is_split_zip, is_split_zip_part};
use autopack_core::stats::sources_size;
use autopack_core::{Error as CoreError, FileKind, FilterOutcome, FilterSet, Interaction, OperationStats};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::CliConfig;
use crate::error::{Error, Result};
use crate::messages::{say, Message};
use crate::process;
use crate::tools::{compress_command, decompress_command, verify_command, CompressRequest, ToolInvocation};

/// One source of a compression run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionSource {
    /// Path as given by the user
    pub path: PathBuf,
    /// Archive the directory's contents rather than the directory itself
    pub contents_only: bool,
}

impl CompressionSource {
    /// Builds a source from a command-line path.
    ///
    /// A trailing path separator selects contents mode.
    pub fn from_arg(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            contents_only: path.as_os_str().to_string_lossy().ends_with(is_separator),
        }
    }

    /// Builds a source that is always archived by name.
    pub fn named(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            contents_only: false,
        }
    }
}

/// Where the archiving tool runs and what it is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionPlan {
    /// Working directory of the tool
    pub working_dir: PathBuf,
    /// Items relative to `working_dir`
    pub items: Vec<PathBuf>,
    /// Canonical source paths, used for size statistics
    pub canonical_sources: Vec<PathBuf>,
}

/// Resolves `path` against the current directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|err| Error::from_io(path, err))
}

/// Finds the deepest directory that contains every path in `paths`.
///
/// The search starts at the parent of the first path and walks upwards.
/// When nothing below the root qualifies, the first path's root is used.
pub fn determine_common_base(paths: &[PathBuf]) -> PathBuf {
    let Some(first) = paths.first() else {
        return env::current_dir().unwrap_or_default();
    };

    let mut base = first
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(first.as_path())
        .to_path_buf();

    loop {
        if paths.iter().all(|path| path.starts_with(&base)) {
            return base;
        }
        match base.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => base = parent.to_path_buf(),
            _ => break,
        }
    }

    first
        .ancestors()
        .last()
        .map_or_else(PathBuf::new, Path::to_path_buf)
}

/// Computes the working directory and item list for `sources`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidSource`] if a source does not exist.
pub fn plan_compression(sources: &[CompressionSource]) -> Result<CompressionPlan> {
    if sources.is_empty() {
        return Err(Error::MissingArgs(
            "No sources provided for compression".to_string(),
        ));
    }

    let canonical_sources = sources
        .iter()
        .map(|source| {
            fs::canonicalize(&source.path)
                .map_err(|err| CoreError::source_unavailable(&source.path, &err))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let contents_dir = match (sources, canonical_sources.as_slice()) {
        ([source], [canonical]) if source.contents_only && canonical.is_dir() => {
            Some(canonical.clone())
        }
        _ => None,
    };
    if let Some(working_dir) = contents_dir {
        return Ok(CompressionPlan {
            working_dir,
            items: vec![PathBuf::from(".")],
            canonical_sources,
        });
    }

    let working_dir = determine_common_base(&canonical_sources);
    let items = canonical_sources
        .iter()
        .map(|canonical| match canonical.strip_prefix(&working_dir) {
            Ok(relative) if relative.as_os_str().is_empty() => PathBuf::from("."),
            Ok(relative) => relative.to_path_buf(),
            Err(_) => canonical
                .file_name()
                .map_or_else(|| canonical.clone(), PathBuf::from),
        })
        .collect();

    Ok(CompressionPlan {
        working_dir,
        items,
        canonical_sources,
    })
}

/// Expands the plan's items into individual files and filters them.
///
/// Directories are walked recursively; the returned paths stay relative to
/// the plan's working directory, in a stable order.
///
/// # Errors
///
/// Returns [`CoreError::InvalidSource`] when every file was filtered out.
pub fn filter_plan(plan: &CompressionPlan, filters: &FilterSet) -> Result<FilterOutcome<PathBuf>> {
    let mut candidates = Vec::new();

    for item in &plan.items {
        let full = if item == Path::new(".") {
            plan.working_dir.clone()
        } else {
            plan.working_dir.join(item)
        };

        if !full.is_dir() {
            candidates.push(item.clone());
            continue;
        }

        for entry in WalkDir::new(&full).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&plan.working_dir) {
                candidates.push(relative.to_path_buf());
            }
        }
    }

    let outcome = filters.filter(candidates);
    if outcome.accepted.is_empty() {
        return Err(CoreError::InvalidSource {
            path: plan.working_dir.clone(),
            reason: Some(
                "No files left to archive after applying include/exclude patterns.".to_string(),
            ),
        }
        .into());
    }

    Ok(outcome)
}

/// Compresses `sources` into `target` as an archive of `kind`.
///
/// # Parameters
///
/// * `sources` - Files or directories to archive
/// * `target` - Archive path (already cleared by conflict resolution)
/// * `kind` - Archive format to produce
/// * `config` - Password, level, threads, filters, verbosity and benchmark flags
/// * `io` - Where progress lines are written
///
/// # Returns
///
/// Statistics for the run when `--benchmark` is set.
///
/// # Errors
///
/// - [`CoreError::InvalidSource`] if a source is missing or filtering left nothing
/// - [`CoreError::UnknownFormat`] if `kind` cannot be created
/// - [`Error::ToolNotFound`] or [`Error::OperationFailed`] from the tool run
pub fn compress(
    sources: &[CompressionSource],
    target: &Path,
    kind: FileKind,
    config: &CliConfig,
    io: &mut dyn Interaction,
) -> Result<Option<OperationStats>> {
    let mut plan = plan_compression(sources)?;
    let threads = config.thread_count();

    if config.verbose {
        if let Some(count) = threads.filter(|&count| count > 1) {
            say(io, &Message::ThreadsInfo.render(&[("COUNT", &count.to_string())]));
        }
    }

    let filters = config.filters();
    if !filters.is_empty() {
        if matches!(kind, FileKind::Lz4 | FileKind::Zstd) {
            warn!(?kind, "include/exclude patterns ignored for single-stream format");
            io.write_err(&Message::WarningFiltersIgnored.render(&[("FORMAT", kind.display_name())]));
            io.write_err("\n");
        } else {
            let outcome = filter_plan(&plan, &filters)?;
            if config.verbose {
                say(
                    io,
                    &Message::FilteringFiles.render(&[
                        ("INCLUDED", &outcome.accepted.len().to_string()),
                        ("EXCLUDED", &outcome.rejected.to_string()),
                    ]),
                );
            }
            plan.items = outcome.accepted;
        }
    }

    let password = config.password();
    if password.is_some() && kind.is_tar_family() {
        say(io, &Message::WarningTarPassword.text());
    }

    let target = absolute(target)?;
    let invocation = compress_command(&CompressRequest {
        kind,
        target: &target,
        items: &plan.items,
        working_dir: &plan.working_dir,
        password,
        level: config.level,
        threads,
    })?;
    process::ensure_tool(invocation.program)?;

    let original_size = config
        .benchmark
        .then(|| sources_size(&plan.canonical_sources));

    say(io, &Message::Compressing.text());
    let started = Instant::now();
    process::run_tool(&invocation)?;
    let elapsed = started.elapsed();

    let stats = original_size.map(|original_size| OperationStats {
        original_size,
        compressed_size: fs::metadata(&target).map(|m| m.len()).unwrap_or(0),
        elapsed,
        threads: threads.unwrap_or(1),
    });

    if config.verify {
        say(io, &Message::Verifying.text());
        let message = if verify(kind, &target) {
            Message::VerificationSuccess
        } else {
            Message::VerificationFailed
        };
        say(io, &message.text());
    }

    say(io, &Message::OperationComplete.text());
    if let Some(stats) = &stats {
        print_stats(stats, io);
    }

    Ok(stats)
}

/// Extracts `source` into `target_dir`, creating the directory if needed.
///
/// Split ZIP sets are extracted with `7z` from their main `.zip` file, which
/// is located automatically when a `.z##` part is given.
///
/// # Errors
///
/// - [`CoreError::InvalidTarget`] if the target directory cannot be created
/// - [`CoreError::InvalidSource`] if the main file of a split set is missing
/// - [`Error::SplitZipRequires7z`] if a split set is given and `7z` is missing
/// - [`CoreError::UnknownFormat`] if `kind` is not an archive
/// - [`Error::ToolNotFound`] or [`Error::OperationFailed`] from the tool run
pub fn decompress(
    source: &Path,
    target_dir: &Path,
    kind: FileKind,
    config: &CliConfig,
    io: &mut dyn Interaction,
) -> Result<()> {
    if !target_dir.exists() {
        fs::create_dir_all(target_dir)
            .map_err(|err| CoreError::invalid_target(target_dir, err.to_string()))?;
        debug!(target = %target_dir.display(), "created target directory");
    }

    let password = config.password();
    if password.is_some() && kind.is_tar_family() {
        say(io, &Message::WarningTarPassword.text());
    }

    let split = kind == FileKind::Zip && is_split_zip(source);
    let mut archive = source.to_path_buf();
    if split {
        if is_split_zip_part(source) {
            archive = find_split_zip_main(source)?;
        }
        if !process::is_tool_available("7z") {
            return Err(Error::SplitZipRequires7z);
        }
        if config.verbose {
            say(io, &Message::SplitZipDetected.text());
        }
    }

    let invocation = decompress_command(
        kind,
        &absolute(&archive)?,
        &absolute(target_dir)?,
        password,
        split,
    )?;
    process::ensure_tool(invocation.program)?;

    say(io, &Message::Decompressing.text());
    process::run_tool(&invocation)?;
    say(io, &Message::OperationComplete.text());

    Ok(())
}

/// Tests `archive` with the format's own tool.
///
/// Formats without a test mode count as verified; a missing tool counts as
/// a failed verification.
pub fn verify(kind: FileKind, archive: &Path) -> bool {
    let Some(invocation) = verify_command(kind, archive) else {
        return true;
    };
    run_quietly(&invocation)
}

fn run_quietly(invocation: &ToolInvocation) -> bool {
    if !process::is_tool_available(invocation.program) {
        warn!(program = invocation.program, "verification tool not found");
        return false;
    }
    matches!(process::execute(invocation), Ok(0))
}

/// Prints the benchmark summary.
pub fn print_stats(stats: &OperationStats, io: &mut dyn Interaction) {
    let time = format!("{:.3}", stats.elapsed.as_secs_f64());
    say(io, &Message::OperationTime.render(&[("TIME", &time)]));

    if stats.has_sizes() {
        say(
            io,
            &Message::CompressionRatio.render(&[
                ("RATIO", &format!("{:.2}", stats.ratio())),
                ("SAVED", &stats.saved_bytes().to_string()),
            ]),
        );
    }

    if stats.threads > 1 {
        say(io, &Message::ThreadsInfo.render(&[("COUNT", &stats.threads.to_string())]));
    }
}

/// Deletes a source after a successful operation, recursively for directories.
///
/// # Errors
///
/// Returns the underlying I/O error.
pub fn remove_source(path: &Path) -> std::io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
