use globset::{GlobBuilder, GlobMatcher};
use snafu::{ResultExt, Snafu, ensure};

use crate::path::PathIdentity;

#[derive(Debug, Clone)]
struct WildcardPattern {
    source: String,
    negated: bool,
    matcher: GlobMatcher,
}

impl WildcardPattern {
    fn compile(source: String) -> Result<Self, FilterError> {
        let (negated, glob) = match source.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, source.as_str()),
        };
        ensure!(!glob.is_empty(), EmptyPatternSnafu { pattern: &source });
        ensure!(
            !glob.contains('/'),
            SeparatorInPatternSnafu { pattern: &source }
        );

        let matcher = GlobBuilder::new(glob)
            .literal_separator(true)
            .backslash_escape(true)
            .build()
            .context(InvalidPatternSnafu { pattern: &source })?
            .compile_matcher();

        Ok(WildcardPattern {
            source,
            negated,
            matcher,
        })
    }
}

/// Shell-style patterns matched against the name of each entry.
///
/// Patterns are evaluated left to right and the last one matching a name
/// decides: a plain pattern includes, a `!` pattern excludes. Entries no
/// pattern matches keep their default, which is "included" for directories
/// (so matching files are found at any depth) and for files only when no
/// plain pattern was given. `["*.txt"]` therefore keeps every directory and
/// only `.txt` files, while `["*", "!.*"]` drops every dot-entry, pruning
/// dot-directories with their whole subtree.
#[derive(Debug, Clone)]
pub struct WildcardFilter {
    patterns: Vec<WildcardPattern>,
    files_included_by_default: bool,
    linked_dirs: bool,
    linked_files: bool,
}

impl WildcardFilter {
    pub fn new<I, S>(patterns: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| WildcardPattern::compile(pattern.into()))
            .collect::<Result<Vec<_>, _>>()?;
        let files_included_by_default = patterns.iter().all(|pattern| pattern.negated);

        Ok(WildcardFilter {
            patterns,
            files_included_by_default,
            linked_dirs: true,
            linked_files: true,
        })
    }

    /// Whether symlinked directories may be accepted at all.
    pub fn with_linked_dirs(mut self, linked_dirs: bool) -> Self {
        self.linked_dirs = linked_dirs;
        self
    }

    /// Whether symlinked files may be accepted at all.
    pub fn with_linked_files(mut self, linked_files: bool) -> Self {
        self.linked_files = linked_files;
        self
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|pattern| pattern.source.as_str())
    }

    pub fn includes(&self, candidate: &PathIdentity) -> bool {
        if candidate.is_symlink() {
            if candidate.is_dir() && !self.linked_dirs {
                return false;
            }
            if candidate.is_file() && !self.linked_files {
                return false;
            }
        }

        let default = candidate.is_dir() || self.files_included_by_default;
        self.patterns.iter().fold(default, |included, pattern| {
            if pattern.matcher.is_match(candidate.name()) {
                !pattern.negated
            } else {
                included
            }
        })
    }

    pub fn accept(&self, candidates: Vec<PathIdentity>) -> Vec<PathIdentity> {
        candidates
            .into_iter()
            .filter(|candidate| self.includes(candidate))
            .collect()
    }
}

#[derive(Debug, Snafu)]
pub enum FilterError {
    #[snafu(display("Wildcard pattern '{}' is empty", pattern))]
    EmptyPattern { pattern: String },
    #[snafu(display(
        "Wildcard pattern '{}' contains a path separator, but patterns match single names",
        pattern
    ))]
    SeparatorInPattern { pattern: String },
    #[snafu(display("Wildcard pattern '{}' is malformed", pattern))]
    InvalidPattern {
        pattern: String,
        source: globset::Error,
    },
}
