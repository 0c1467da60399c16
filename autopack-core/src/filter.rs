//! Include/exclude filtering of paths.
//!
//! Patterns are regular expressions that must match the whole file name or
//! the whole path. A pattern that fails to compile is kept as a literal and
//! matches by substring containment instead.

use std::path::Path;

use regex::Regex;
use tracing::debug;

/// A single include or exclude pattern.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Anchored regular expression
    Regex(Regex),
    /// Literal fallback for patterns that are not valid regular expressions
    Literal(String),
}

impl Pattern {
    /// Compiles `pattern`, falling back to a literal on a syntax error.
    ///
    /// Validity is judged on the pattern as written; only a valid pattern is
    /// then anchored to the whole text.
    pub fn new(pattern: &str) -> Self {
        let anchored = Regex::new(pattern).and_then(|_| Regex::new(&format!("^(?:{pattern})$")));
        match anchored {
            Ok(regex) => Pattern::Regex(regex),
            Err(err) => {
                debug!(pattern, error = %err, "pattern is not a valid regex, using substring match");
                Pattern::Literal(pattern.to_string())
            }
        }
    }

    /// Tests `text` against this pattern.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Pattern::Regex(regex) => regex.is_match(text),
            Pattern::Literal(literal) => text.contains(literal.as_str()),
        }
    }
}

/// Result of filtering a batch of paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome<P> {
    /// Accepted paths, in input order
    pub accepted: Vec<P>,
    /// Number of rejected paths
    pub rejected: usize,
}

/// Compiled include and exclude pattern sets.
///
/// Exclusion is always evaluated first: an excluded path is rejected no
/// matter which include patterns it matches.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl FilterSet {
    /// Compiles both pattern lists.
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Self {
        Self {
            include: include.iter().map(|p| Pattern::new(p.as_ref())).collect(),
            exclude: exclude.iter().map(|p| Pattern::new(p.as_ref())).collect(),
        }
    }

    /// Returns `true` when neither list holds a pattern (everything passes).
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Decides whether `path` takes part in the operation.
    pub fn should_include(&self, path: &Path) -> bool {
        let full = path.to_string_lossy();
        let name = path
            .file_name()
            .map_or_else(|| full.clone(), |name| name.to_string_lossy());

        let hit = |pattern: &Pattern| pattern.matches(&name) || pattern.matches(&full);

        if self.exclude.iter().any(hit) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(hit)
    }

    /// Filters `paths`, preserving input order.
    pub fn filter<P, I>(&self, paths: I) -> FilterOutcome<P>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        let mut accepted = Vec::new();
        let mut rejected = 0;

        for path in paths {
            if self.should_include(path.as_ref()) {
                accepted.push(path);
            } else {
                debug!(path = %path.as_ref().display(), "excluded by filter");
                rejected += 1;
            }
        }

        debug!(accepted = accepted.len(), rejected, "filtering finished");
        FilterOutcome { accepted, rejected }
    }
}

/// One-shot form of [`FilterSet::should_include`].
pub fn should_include<S: AsRef<str>>(path: &Path, include: &[S], exclude: &[S]) -> bool {
    FilterSet::new(include, exclude).should_include(path)
}

/// One-shot form of [`FilterSet::filter`].
pub fn filter<P, S>(paths: Vec<P>, include: &[S], exclude: &[S]) -> FilterOutcome<P>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    FilterSet::new(include, exclude).filter(paths)
}
