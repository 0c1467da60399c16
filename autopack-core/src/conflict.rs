//! Negotiation with the user when the target path already exists.
//!
//! The resolver is a small state machine driven only by user answers:
//!
//! ```text
//! Check ──exists──▶ Prompt ──o──▶ overwrite (accept, or re-prompt on failure)
//!   ▲                  ├────c──▶ cancelled
//!   │                  └────r──▶ Renaming ──rejected──▶ Renaming
//!   └──────────candidate accepted──────────┘
//! ```
//!
//! There is no retry limit; an exhausted input stream ends the negotiation
//! with [`Error::InputClosed`].

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::interaction::Interaction;


/// Multi-part archive suffixes kept intact when a default name is generated,
/// in priority order.
const MULTI_PART_SUFFIXES: &[&str] = &[".tar.gz", ".tar.bz2", ".tar.xz", ".tar.zst", ".tar.lz4"];

/// Stem used when the target name yields nothing usable.
const FALLBACK_STEM: &str = "target";

/// What the user chose at the top-level prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Replace the existing target
    Overwrite,
    /// Abandon the operation
    Cancel,
    /// Pick a different target path
    Rename,
}

impl Action {
    /// Parses an answer by its first character (`o`, `c` or `r`, any case).
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('o') => Some(Action::Overwrite),
            Some('c') => Some(Action::Cancel),
            Some('r') => Some(Action::Rename),
            _ => None,
        }
    }
}

/// Final outcome of the negotiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Proceed with this target path
    Accepted(PathBuf),
    /// The user cancelled; the original target was left untouched
    Cancelled,
}

enum State {
    Check,
    Prompt { is_dir: bool },
    Renaming,
}

/// Bookkeeping for one negotiation.
#[derive(Debug, Clone)]
pub struct TargetConflict {
    current: PathBuf,
    rename_base: PathBuf,
    suffix: u32,
}

impl TargetConflict {
    /// Starts a negotiation for `target`.
    pub fn new(target: impl Into<PathBuf>) -> Self {
        let target = target.into();
        Self {
            rename_base: target.clone(),
            current: target,
            suffix: 1,
        }
    }

    /// The path currently under consideration.
    pub fn current(&self) -> &Path {
        &self.current
    }

    /// The default name that would be proposed next.
    pub fn next_default(&self) -> PathBuf {
        default_candidate(&self.rename_base, self.suffix)
    }

    /// Runs the negotiation to completion.
    ///
    /// # Errors
    ///
    /// - [`Error::InputClosed`] if the input stream ends before a decision
    /// - [`Error::InvalidTarget`] if the current target cannot be probed
    pub fn resolve(mut self, io: &mut dyn Interaction) -> Result<Resolution> {
        let mut state = State::Check;

        loop {
            state = match state {
                State::Check => match fs::metadata(&self.current) {
                    Ok(metadata) => State::Prompt {
                        is_dir: metadata.is_dir(),
                    },
                    Err(err) if err.kind() == ErrorKind::NotFound => {
                        debug!(target = %self.current.display(), "target accepted");
                        return Ok(Resolution::Accepted(self.current));
                    }
                    Err(err) => return Err(Error::invalid_target(&self.current, err.to_string())),
                },

                State::Prompt { is_dir } => match prompt_action(io, &self.current, is_dir)? {
                    Action::Overwrite if is_dir => {
                        io.write_out(
                            "Proceeding without deleting the existing directory. Existing files may be overwritten.\n",
                        );
                        return Ok(Resolution::Accepted(self.current));
                    }
                    Action::Overwrite => match fs::remove_file(&self.current) {
                        Ok(()) => {
                            debug!(target = %self.current.display(), "existing target removed");
                            return Ok(Resolution::Accepted(self.current));
                        }
                        Err(err) => {
                            io.write_err(&format!(
                                "Failed to remove existing target '{}': {err}\n",
                                self.current.display()
                            ));
                            State::Prompt { is_dir }
                        }
                    },
                    Action::Cancel => {
                        debug!(target = %self.current.display(), "conflict resolution cancelled");
                        return Ok(Resolution::Cancelled);
                    }
                    Action::Rename => State::Renaming,
                },

                State::Renaming => self.propose(io)?,
            };
        }
    }

    /// One round of the rename sub-loop.
    fn propose(&mut self, io: &mut dyn Interaction) -> Result<State> {
        let default = self.next_default();
        io.write_out(&format!(
            "Enter a new target path (default: {}): ",
            default.display()
        ));

        let answer = io.read_line()?;
        let is_default = answer.is_empty() || Path::new(&answer) == default;
        let candidate = if answer.is_empty() {
            default
        } else {
            PathBuf::from(answer)
        };

        if candidate == self.current {
            io.write_err(
                "New target path matches the current path. Please choose a different value.\n",
            );
            if is_default {
                self.suffix += 1;
            }
            return Ok(State::Renaming);
        }

        match candidate.try_exists() {
            Ok(true) => {
                io.write_err(&format!(
                    "Path '{}' already exists. You may overwrite it or choose a different name.\n",
                    candidate.display()
                ));
                self.advance(candidate, is_default);
                Ok(State::Renaming)
            }
            Ok(false) => {
                self.advance(candidate.clone(), is_default);
                self.current = candidate;
                Ok(State::Check)
            }
            Err(err) => {
                io.write_err(&format!("Cannot use '{}': {err}\n", candidate.display()));
                Ok(State::Renaming)
            }
        }
    }

    /// Updates the naming bookkeeping after a candidate was examined.
    ///
    /// Default candidates bump the counter; user-typed names become the new
    /// base with the counter restarted at 1.
    fn advance(&mut self, candidate: PathBuf, is_default: bool) {
        if is_default {
            self.suffix += 1;
        } else {
            self.rename_base = candidate;
            self.suffix = 1;
        }
    }
}

/// Resolves a conflict on `target`, returning immediately when it is free.
///
/// # Errors
///
/// See [`TargetConflict::resolve`].
pub fn resolve_existing_target(target: &Path, io: &mut dyn Interaction) -> Result<Resolution> {
    TargetConflict::new(target).resolve(io)
}

/// Shows the Overwrite/Cancel/Rename prompt until a valid choice is made.
fn prompt_action(io: &mut dyn Interaction, target: &Path, is_dir: bool) -> Result<Action> {
    let object = if is_dir { "directory" } else { "file" };
    io.write_out(&format!(
        "Target {object} '{}' already exists.\nChoose action: [O]verwrite / [C]ancel / [R]ename\n",
        target.display()
    ));

    loop {
        io.write_out("Choice (o/c/r): ");
        if let Some(action) = Action::parse(&io.read_line()?) {
            return Ok(action);
        }
        io.write_out("Invalid choice, please enter o, c, or r.\n");
    }
}

/// Generates the default rename proposal `<parent>/<stem>_<suffix><ext>`.
///
/// A known multi-part archive suffix (`.tar.gz`, ...) is kept whole; otherwise
/// only the last extension is split off. Names without an extension, or whose
/// only dot is the leading one, keep the whole name as the stem.
pub fn default_candidate(base: &Path, suffix: u32) -> PathBuf {
    let parent = base.parent().unwrap_or_else(|| Path::new(""));
    let file_name = base
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (stem, extension) = MULTI_PART_SUFFIXES
        .iter()
        .find(|ext| file_name.len() > ext.len() && file_name.ends_with(*ext))
        .map(|ext| (&file_name[..file_name.len() - ext.len()], *ext))
        .unwrap_or_else(|| match file_name.rfind('.') {
            None | Some(0) => (file_name.as_str(), ""),
            Some(pos) => (&file_name[..pos], &file_name[pos..]),
        });

    let stem = if stem.is_empty() || stem == "." || stem == ".." {
        FALLBACK_STEM
    } else {
        stem
    };

    parent.join(format!("{stem}_{suffix}{extension}"))
}
