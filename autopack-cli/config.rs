//! Configuration types and constants for the autopack command line.

use std::path::PathBuf;

use autopack_core::{FilterSet, Threading};

use crate::error::{Error, Result};

/// Name used in help output and diagnostics
pub const PROGRAM_NAME: &str = "autopack";

/// Compression level used when `-l` is given without a value
pub const DEFAULT_LEVEL: u32 = 6;

/// Environment variable that may carry the archive password
pub const PASSWORD_ENV: &str = "AUTOPACK_PASSWORD";

/// Configuration for one autopack invocation
#[derive(Debug, Clone, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct CliConfig {
    /// Run the guided interactive mode
    pub interactive: bool,
    /// Source paths exactly as given (a trailing separator is significant)
    pub sources: Vec<PathBuf>,
    /// Target path (archive for compression, directory for extraction)
    pub target: Option<PathBuf>,
    /// Archive password
    pub password: Option<String>,
    /// Prompt for the password before running
    pub ask_password: bool,
    /// Compression level (1-9)
    pub level: Option<u32>,
    /// Thread hint forwarded to tools that understand one
    pub threads: Option<Threading>,
    /// Verbose output
    pub verbose: bool,
    /// Print timing and size statistics
    pub benchmark: bool,
    /// Test the archive after compressing it
    pub verify: bool,
    /// Patterns a file must match to be archived
    pub include: Vec<String>,
    /// Patterns that exclude a file from the archive
    pub exclude: Vec<String>,
    /// Forced format name (`--format`)
    pub format: Option<String>,
}

impl CliConfig {
    /// Splits the positional arguments into sources and target.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingArgs`] when either side is absent.
    pub fn positional(&self) -> Result<(&[PathBuf], &PathBuf)> {
        if self.sources.is_empty() {
            return Err(Error::MissingArgs("Source path missing".to_string()));
        }
        let target = self
            .target
            .as_ref()
            .ok_or_else(|| Error::MissingArgs("Target path missing".to_string()))?;
        Ok((&self.sources, target))
    }

    /// Compiles the include/exclude patterns.
    pub fn filters(&self) -> FilterSet {
        FilterSet::new(&self.include, &self.exclude)
    }

    /// Concrete thread count, if a thread hint was given.
    pub fn thread_count(&self) -> Option<u32> {
        self.threads.map(Threading::resolve)
    }

    /// Password to hand to tools; an empty string counts as none.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}
