use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crossbeam_channel::{bounded, Receiver, SendError, Sender};
use tracing::{debug, info};

use super::matcher::PatternMatcher;
use super::scanner::LineScanner;
use super::walker;
use crate::config::SearchConfig;
use crate::errors::SearchResult;
use crate::filters::IgnoreSet;
use crate::results::{ScanResult, SearchEvent, SearchStats};

/// Capacity of the event channel between the workers and the writer
const EVENT_BUFFER: usize = 256;

/// Read buffer handed to the line scanner, sized to its line ceiling
const READ_BUFFER: usize = 64 * 1024;

/// Runs a complete search, writing one output line per event to `out`.
///
/// The coordinator compiles the pattern, builds the ignore set, starts one
/// producer walking the roots and a fixed pool of workers, and then
/// serializes all output itself: every event is written whole, on this
/// thread, so concurrent workers can never interleave partial lines.
///
/// The path channel has zero capacity, a pure handoff: the producer blocks
/// until a worker is ready, capping in-flight filesystem work at roughly
/// the pool size. Returns only after the producer has closed the channel
/// and every worker has drained it and exited.
pub fn search(config: &SearchConfig, out: &mut dyn Write) -> SearchResult<SearchStats> {
    let matcher = PatternMatcher::new(&config.pattern, &config.match_options())?;

    let mut ignore = IgnoreSet::with_defaults()?;
    for source in &config.ignore_files {
        ignore.load_ignore_file(source);
    }

    debug!(
        "starting search: pattern={:?} roots={:?} workers={}",
        config.pattern, config.roots, config.workers
    );

    let (path_tx, path_rx) = bounded::<PathBuf>(0);
    let (event_tx, event_rx) = bounded::<SearchEvent>(EVENT_BUFFER);
    let files_scanned = AtomicUsize::new(0);

    let mut stats = thread::scope(|scope| {
        let matcher = &matcher;
        let ignore = &ignore;
        let roots = &config.roots;
        let counter = &files_scanned;

        scope.spawn(move || walker::walk_roots(roots, ignore, path_tx));

        for _ in 0..config.workers.get() {
            let paths = path_rx.clone();
            let events = event_tx.clone();
            scope.spawn(move || run_worker(paths, events, matcher, counter));
        }
        // Only the producer and the workers may hold channel ends now,
        // or closure would never propagate to the writer loop below.
        drop(path_rx);
        drop(event_tx);

        write_events(event_rx, out)
    });
    stats.files_scanned = files_scanned.load(Ordering::Relaxed);

    info!(
        "search complete: {} matching lines in {} scanned files, {} file errors",
        stats.matched_lines, stats.files_scanned, stats.file_errors
    );
    Ok(stats)
}

/// One pool member: receives paths until the channel is closed and
/// drained, scanning each file and emitting an event per matching line or
/// per failure. Holds at most one open file at a time.
fn run_worker(
    paths: Receiver<PathBuf>,
    events: Sender<SearchEvent>,
    matcher: &PatternMatcher,
    files_scanned: &AtomicUsize,
) {
    while let Ok(path) = paths.recv() {
        files_scanned.fetch_add(1, Ordering::Relaxed);
        if scan_file(&path, &events, matcher).is_err() {
            // The writer is gone; no point receiving more work.
            return;
        }
    }
}

/// Scans one file; the only error is a closed event channel. The file
/// handle is dropped before the function returns, so the worker never
/// holds a file across a receive.
fn scan_file(
    path: &Path,
    events: &Sender<SearchEvent>,
    matcher: &PatternMatcher,
) -> Result<(), SendError<SearchEvent>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            return events.send(SearchEvent::FileError {
                path: path.to_path_buf(),
                message: e.to_string(),
            });
        }
    };

    for item in LineScanner::new(BufReader::with_capacity(READ_BUFFER, file)) {
        match item {
            Ok((line_number, line)) => {
                if matcher.is_match(&line) {
                    events.send(SearchEvent::Match(ScanResult {
                        path: path.to_path_buf(),
                        line_number,
                        line,
                    }))?;
                }
            }
            Err(e) => {
                // Already-emitted lines for this file stay valid; the
                // scan just stops here.
                return events.send(SearchEvent::FileError {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Drains the event channel, writing each event as one whole line
fn write_events(events: Receiver<SearchEvent>, out: &mut dyn Write) -> SearchStats {
    let mut stats = SearchStats::default();
    for event in events {
        match &event {
            SearchEvent::Match(_) => stats.matched_lines += 1,
            SearchEvent::FileError { .. } => stats.file_errors += 1,
        }
        if let Err(e) = writeln!(out, "{event}") {
            debug!("output sink closed: {e}");
            break;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;

    fn run(config: &SearchConfig) -> Result<(Vec<String>, SearchStats)> {
        let mut out = Vec::new();
        let stats = search(config, &mut out)?;
        let mut lines: Vec<String> = String::from_utf8(out)?
            .lines()
            .map(str::to_string)
            .collect();
        lines.sort();
        Ok((lines, stats))
    }

    #[test]
    fn test_basic_search() -> Result<()> {
        let dir = tempfile::Builder::new().prefix("scour-engine-").tempdir()?;
        fs::write(dir.path().join("a.txt"), "foo\nbar\nfoobar\n")?;

        let config = SearchConfig {
            pattern: "foo".to_string(),
            roots: vec![dir.path().to_path_buf()],
            ignore_files: vec![],
            ..Default::default()
        };

        let (lines, stats) = run(&config)?;
        let path = dir.path().join("a.txt");
        assert_eq!(
            lines,
            vec![
                format!("{}:1:foo", path.display()),
                format!("{}:3:foobar", path.display()),
            ]
        );
        assert_eq!(stats.matched_lines, 2);
        assert_eq!(stats.files_scanned, 1);
        assert_eq!(stats.file_errors, 0);
        Ok(())
    }

    #[test]
    fn test_invert_search() -> Result<()> {
        let dir = tempfile::Builder::new().prefix("scour-engine-").tempdir()?;
        fs::write(dir.path().join("a.txt"), "foo\nbar\nfoobar\n")?;

        let config = SearchConfig {
            pattern: "foo".to_string(),
            roots: vec![dir.path().to_path_buf()],
            invert_match: true,
            ignore_files: vec![],
            ..Default::default()
        };

        let (lines, _) = run(&config)?;
        assert_eq!(
            lines,
            vec![format!("{}:2:bar", dir.path().join("a.txt").display())]
        );
        Ok(())
    }

    #[test]
    fn test_invalid_pattern_fails_before_any_search() {
        let config = SearchConfig {
            pattern: "fo[".to_string(),
            roots: vec![PathBuf::from(".")],
            ..Default::default()
        };
        let mut out = Vec::new();
        assert!(search(&config, &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_roots_finish_cleanly() -> Result<()> {
        let config = SearchConfig {
            pattern: "foo".to_string(),
            roots: vec![],
            ignore_files: vec![],
            ..Default::default()
        };
        let (lines, stats) = run(&config)?;
        assert!(lines.is_empty());
        assert_eq!(stats, SearchStats::default());
        Ok(())
    }
}
