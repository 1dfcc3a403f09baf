use regex::Regex;
use std::path::Path;
use tracing::{debug, warn};

use crate::errors::SearchResult;

/// Patterns installed before any user configuration. Together they hide
/// dotfiles and dot-directories at any depth of the walked path.
const HIDDEN_PATTERNS: [&str; 2] = [r"^\.", r"/\."];

/// An ordered set of compiled path-exclusion patterns.
///
/// Built once before the walk begins and never mutated afterwards; the
/// walk shares it read-only. A path is excluded if any pattern matches its
/// literal string form. Insertion order is the precedence order for
/// diagnostics, though any single match is enough to exclude.
#[derive(Debug, Default)]
pub struct IgnoreSet {
    patterns: Vec<Regex>,
}

impl IgnoreSet {
    /// Creates a set holding only the built-in dotfile patterns
    pub fn with_defaults() -> SearchResult<Self> {
        let mut set = Self::default();
        for pattern in HIDDEN_PATTERNS {
            set.add_pattern(pattern)?;
        }
        Ok(set)
    }

    /// Compiles `pattern` and appends it to the set
    pub fn add_pattern(&mut self, pattern: &str) -> SearchResult<()> {
        self.patterns.push(Regex::new(pattern)?);
        Ok(())
    }

    /// Loads newline-separated glob-ish entries from an ignore source.
    ///
    /// Blank lines and `#` comments are skipped; `*` expands to `.*`
    /// before compilation. A nonexistent source contributes nothing. An
    /// unreadable source, or an entry that fails to compile, is warned
    /// and skipped rather than failing the run.
    pub fn load_ignore_file(&mut self, path: &Path) {
        if !path.exists() {
            debug!("ignore source {} not present", path.display());
            return;
        }

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("unable to read {}: {}", path.display(), e);
                return;
            }
        };

        for line in contents.lines() {
            let entry = line.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            let pattern = entry.replace('*', ".*");
            if let Err(e) = self.add_pattern(&pattern) {
                warn!(
                    "skipping invalid entry {:?} in {}: {}",
                    entry,
                    path.display(),
                    e
                );
            }
        }
    }

    /// Returns true if any pattern matches the literal path string
    pub fn exclude(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.patterns.iter().any(|p| p.is_match(&path))
    }

    /// Number of compiled patterns, built-ins included
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
