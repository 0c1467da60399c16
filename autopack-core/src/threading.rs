//! Resolution of the thread-count hint forwarded to external tools.

/// Largest thread count accepted on the command line.
pub const MAX_THREADS: u32 = 1024;

/// Thread configuration requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Threading {
    /// Use one thread per logical CPU.
    #[default]
    Auto,
    /// Use an explicit number of threads.
    ///
    /// Zero is treated as [`Threading::Auto`]; values above [`MAX_THREADS`]
    /// are capped.
    Exact(u32),
}

impl Threading {
    /// Converts the configuration into a concrete thread count.
    ///
    /// # Returns
    ///
    /// A value in `1..=MAX_THREADS`.
    pub fn resolve(self) -> u32 {
        match self {
            Threading::Auto | Threading::Exact(0) => detected_threads(),
            Threading::Exact(requested) => requested.min(MAX_THREADS),
        }
    }
}

impl From<Option<u32>> for Threading {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Threading::Auto, Threading::Exact)
    }
}

/// Number of logical CPUs, clamped to `1..=MAX_THREADS`.
fn detected_threads() -> u32 {
    u32::try_from(num_cpus::get())
        .unwrap_or(MAX_THREADS)
        .clamp(1, MAX_THREADS)
}
