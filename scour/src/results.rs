use std::fmt;
use std::path::PathBuf;

/// One reported line: a matching (or, inverted, non-matching) line of a
/// scanned file. Emitted as soon as it is found and never aggregated
/// across files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// The file the line was found in
    pub path: PathBuf,
    /// The 1-based line number
    pub line_number: usize,
    /// The line text, terminators stripped
    pub line: String,
}

impl fmt::Display for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.path.display(),
            self.line_number,
            self.line
        )
    }
}

/// The unit of the output channel. Each event is rendered as exactly one
/// line by the single writer, so concurrent workers can never interleave
/// partial output.
#[derive(Debug, Clone)]
pub enum SearchEvent {
    /// A reported line
    Match(ScanResult),
    /// A per-file failure: the file could not be opened, or scanning
    /// aborted partway through
    FileError { path: PathBuf, message: String },
}

impl fmt::Display for SearchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchEvent::Match(result) => result.fmt(f),
            SearchEvent::FileError { path, message } => {
                write!(f, "{}: {}", path.display(), message)
            }
        }
    }
}

/// Counters for one completed search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Files handed to a worker
    pub files_scanned: usize,
    /// Matching lines written
    pub matched_lines: usize,
    /// Files reported unreadable or aborted mid-scan
    pub file_errors: usize,
}
