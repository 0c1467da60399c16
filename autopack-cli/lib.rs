//! Command-line front end of the autopack archive dispatcher.
//!
//! [`run`] takes a validated [`CliConfig`], decides what to do with the
//! help of `autopack-core`, negotiates the target with the user, and drives
//! the matching external tool. All user interaction goes through an
//! [`Interaction`], so the whole flow can be exercised with scripted input.

use std::path::{Path, PathBuf};

use autopack_core::extension::recognize_by_extension;
use autopack_core::{
    ensure_distinct, recognize, resolve_existing_target, FileKind, Interaction, OperationKind,
    OperationStats, RecognitionResult, Resolution,
};
use tracing::debug;

pub mod config;
pub mod error;
pub mod interactive;
pub mod messages;
pub mod operations;
pub mod process;
pub mod terminal;
pub mod tools;


pub use config::{CliConfig, PROGRAM_NAME};
pub use error::{exit_code, format_error_for_stderr, Error, Result};
pub use terminal::Terminal;

use messages::{say, Message};
use operations::CompressionSource;

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The operation ran; statistics are present with `--benchmark`
    Completed(Option<OperationStats>),
    /// The user cancelled at the target conflict prompt
    Cancelled,
}

/// Runs one autopack invocation.
///
/// # Parameters
///
/// * `config` - Validated command-line configuration
/// * `io` - Interaction used for prompts and progress output
///
/// # Returns
///
/// [`Outcome::Cancelled`] when the user backed out, otherwise
/// [`Outcome::Completed`].
///
/// # Errors
///
/// Any [`Error`]; [`Error::exit_code`] gives the matching process status.
pub fn run(mut config: CliConfig, io: &mut dyn Interaction) -> Result<Outcome> {
    if config.ask_password {
        config.password = Some(io.read_secret(&Message::EnterPassword.text())?);
    }

    if config.interactive {
        return interactive::run(config, io);
    }

    let (sources, target) = config.positional()?;
    if let [source] = sources {
        run_single(source, target, &config, io)
    } else {
        run_many(sources, target, &config, io)
    }
}

/// One source: the operation is inferred from what the source is.
fn run_single(
    source: &Path,
    target: &Path,
    config: &CliConfig,
    io: &mut dyn Interaction,
) -> Result<Outcome> {
    ensure_distinct(source, target)?;

    let mut recognition = recognize(source, target)?;
    if let Some(format) = &config.format {
        recognition = recognition.with_override(format)?;
    }
    let kind = recognition.archive_kind()?;
    debug!(operation = %recognition.operation, ?kind, "dispatching");

    let Some(target) = accept_target(target, io)? else {
        return Ok(Outcome::Cancelled);
    };

    match recognition.operation {
        OperationKind::Compress => {
            let sources = [CompressionSource::from_arg(source)];
            operations::compress(&sources, &target, kind, config, io).map(Outcome::Completed)
        }
        OperationKind::Decompress => {
            operations::decompress(source, &target, kind, config, io)?;
            Ok(Outcome::Completed(None))
        }
    }
}

/// Several sources: always compression into the target archive.
fn run_many(
    sources: &[PathBuf],
    target: &Path,
    config: &CliConfig,
    io: &mut dyn Interaction,
) -> Result<Outcome> {
    for source in sources {
        ensure_distinct(source, target)?;
    }

    let mut recognition = RecognitionResult {
        source_kind: FileKind::Unknown,
        target_hint: recognize_by_extension(target),
        operation: OperationKind::Compress,
    };
    if let Some(format) = &config.format {
        recognition = recognition.with_override(format)?;
    }
    let kind = recognition.archive_kind()?;

    let Some(target) = accept_target(target, io)? else {
        return Ok(Outcome::Cancelled);
    };

    let sources: Vec<_> = sources
        .iter()
        .map(|source| CompressionSource::named(source))
        .collect();
    operations::compress(&sources, &target, kind, config, io).map(Outcome::Completed)
}

/// Runs conflict resolution on `target`.
///
/// Returns the path to use, or `None` after printing the cancellation line.
pub(crate) fn accept_target(target: &Path, io: &mut dyn Interaction) -> Result<Option<PathBuf>> {
    match resolve_existing_target(target, io)? {
        Resolution::Accepted(path) => Ok(Some(path)),
        Resolution::Cancelled => {
            say(io, &Message::OperationCanceled.text());
            Ok(None)
        }
    }
}
