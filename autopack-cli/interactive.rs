//! Guided interactive mode (`-i`).

use std::path::PathBuf;

use autopack_core::{
    ensure_distinct, recognize_source_type, Error as CoreError, FileKind, Interaction,
    OperationKind,
};
use tracing::debug;

use crate::config::CliConfig;
use crate::error::Result;
use crate::messages::{say, Message};
use crate::operations::{self, CompressionSource};
use crate::{accept_target, Outcome};

/// Formats offered for compression, in menu order.
const FORMAT_MENU: &[(FileKind, &str)] = &[
    (FileKind::TarGz, "tar.gz (gzip compression)"),
    (FileKind::Zip, "zip (supports password)"),
    (FileKind::SevenZip, "7z (supports password)"),
    (FileKind::Tar, "tar (no compression)"),
    (FileKind::TarBz2, "tar.bz2 (bzip2 compression)"),
    (FileKind::TarXz, "tar.xz (xz compression)"),
    (FileKind::Lz4, "lz4 (fast compression)"),
    (FileKind::Zstd, "zstd (modern compression)"),
    (FileKind::Xar, "xar (macOS archive format)"),
];

/// Walks the user through source, operation, format, target and cleanup.
///
/// # Errors
///
/// Fails like the non-interactive flow; an empty compression target is
/// [`CoreError::InvalidTarget`], and running out of input is
/// [`CoreError::InputClosed`].
pub fn run(mut config: CliConfig, io: &mut dyn Interaction) -> Result<Outcome> {
    say(io, &Message::InteractiveMode.text());

    let source = match config.sources.first() {
        Some(source) => source.clone(),
        None => {
            io.write_out(&Message::AskSourcePath.text());
            PathBuf::from(io.read_line()?)
        }
    };

    let source_kind = recognize_source_type(&source)?;
    say(
        io,
        &Message::SourceInfo.render(&[
            ("SOURCE_PATH", source.display().to_string().as_str()),
            ("TYPE", source_kind.display_name()),
        ]),
    );

    let mut operation = if matches!(source_kind, FileKind::Directory | FileKind::RegularFile) {
        OperationKind::Compress
    } else {
        OperationKind::Decompress
    };

    let change = Message::DetectedOperation.render(&[("OPERATION", operation.to_string())]);
    if io.confirm(&change)? {
        say(io, &Message::AskOperation.text());
        say(io, &Message::OperationCompress.text());
        say(io, &Message::OperationDecompress.text());
        operation = if io.choose(1, 2)? == 1 {
            OperationKind::Compress
        } else {
            OperationKind::Decompress
        };
    }

    let (kind, target) = match operation {
        OperationKind::Compress => ask_compression(&mut config, io)?,
        OperationKind::Decompress => {
            let kind = match &config.format {
                Some(format) => format.parse::<FileKind>()?,
                None => source_kind,
            };
            (kind, ask_extraction(&mut config, io)?)
        }
    };
    debug!(%operation, ?kind, target = %target.display(), "interactive choices made");

    ensure_distinct(&source, &target)?;
    let Some(target) = accept_target(&target, io)? else {
        return Ok(Outcome::Cancelled);
    };

    let source_display = source.display().to_string();
    let delete_source =
        io.confirm(&Message::AskDeleteSource.render(&[("SOURCE_PATH", &source_display)]))?;

    let stats = match operation {
        OperationKind::Compress => {
            let sources = [CompressionSource::from_arg(&source)];
            operations::compress(&sources, &target, kind, &config, io)?
        }
        OperationKind::Decompress => {
            operations::decompress(&source, &target, kind, &config, io)?;
            None
        }
    };

    if delete_source {
        say(io, &Message::DeletingSource.render(&[("SOURCE_PATH", &source_display)]));
        match operations::remove_source(&source) {
            Ok(()) => say(io, &Message::SourceDeleted.text()),
            Err(err) => {
                let reason = err.to_string();
                io.write_err(&Message::DeleteSourceFailed.render(&[
                    ("SOURCE_PATH", &source_display),
                    ("REASON", &reason),
                ]));
                io.write_err("\n");
            }
        }
    }

    Ok(Outcome::Completed(stats))
}

/// Format menu, target archive path and optional password.
fn ask_compression(
    config: &mut CliConfig,
    io: &mut dyn Interaction,
) -> Result<(FileKind, PathBuf)> {
    say(io, &Message::AskFormat.text());
    for (index, (_, label)) in FORMAT_MENU.iter().enumerate() {
        say(io, &format!("{}. {label}", index + 1));
    }
    let (kind, _) = FORMAT_MENU[io.choose(1, FORMAT_MENU.len())? - 1];

    io.write_out(&Message::AskTargetArchive.text());
    let target = io.read_line()?;
    if target.is_empty() {
        return Err(CoreError::invalid_target("", "Target path cannot be empty").into());
    }

    if kind.supports_password()
        && config.password().is_none()
        && io.confirm(&Message::AskSetPassword.text())?
    {
        config.password = Some(ask_new_password(io)?);
    }

    Ok((kind, PathBuf::from(target)))
}

/// Optional password and target directory (defaults to `.`).
fn ask_extraction(config: &mut CliConfig, io: &mut dyn Interaction) -> Result<PathBuf> {
    if config.password().is_none() && io.confirm(&Message::AskHasPassword.text())? {
        config.password = Some(io.read_secret(&Message::EnterPassword.text())?);
    }

    io.write_out(&Message::AskTargetDirectory.text());
    let target = io.read_line()?;
    Ok(if target.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(target)
    })
}

/// Asks for a new password twice until both entries match.
fn ask_new_password(io: &mut dyn Interaction) -> Result<String> {
    loop {
        let first = io.read_secret(&Message::EnterPassword.text())?;
        let second = io.read_secret(&Message::ConfirmPassword.text())?;
        if first == second {
            return Ok(first);
        }
        say(io, &Message::PasswordMismatch.text());
    }
}

#[cfg(test)]
mod tests {
    use autopack_core::ScriptedInteraction;

    use super::*;

    #[test]
    fn new_password_must_be_entered_twice() {
        let mut io = ScriptedInteraction::new(["first", "typo", "again", "again"]);
        assert_eq!(ask_new_password(&mut io).unwrap(), "again");
        assert_eq!(io.output.matches("Passwords do not match").count(), 1);
        assert_eq!(io.output.matches("Confirm password: ").count(), 2);
    }

    #[test]
    fn format_menu_lists_only_creatable_kinds() {
        assert_eq!(FORMAT_MENU.len(), 9);
        assert!(FORMAT_MENU.iter().all(|(kind, _)| kind.is_archive()));
        assert!(!FORMAT_MENU.iter().any(|(kind, _)| *kind == FileKind::Rar));
    }

    #[test]
    fn empty_extraction_directory_means_current() {
        let mut config = CliConfig::default();
        let mut io = ScriptedInteraction::new(["y", "pw", ""]);
        assert_eq!(ask_extraction(&mut config, &mut io).unwrap(), PathBuf::from("."));
        assert_eq!(config.password.as_deref(), Some("pw"));
    }
}
