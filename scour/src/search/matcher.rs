use regex::Regex;

use crate::config::MatchOptions;
use crate::errors::SearchResult;

/// A compiled search pattern with the match polarity baked in.
///
/// Case-insensitivity is applied by rewriting the pattern source with a
/// `(?i)` prefix before compilation, so the compiled pattern carries its
/// mode and can be shared read-only across any number of workers.
#[derive(Debug)]
pub struct PatternMatcher {
    regex: Regex,
    invert: bool,
}

impl PatternMatcher {
    /// Compiles `pattern` under the given options
    pub fn new(pattern: &str, options: &MatchOptions) -> SearchResult<Self> {
        let source = if options.case_insensitive {
            format!("(?i){pattern}")
        } else {
            pattern.to_string()
        };
        Ok(Self {
            regex: Regex::new(&source)?,
            invert: options.invert,
        })
    }

    /// Tests one line against the pattern, honoring the invert flag
    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line) != self.invert
    }
}
