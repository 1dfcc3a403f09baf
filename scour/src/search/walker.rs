use std::path::{Path, PathBuf};

use crossbeam_channel::Sender;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::filters::IgnoreSet;

/// Why a walked entry did not become a search path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    /// The traversal could not read the entry (permissions, broken link)
    WalkError,
    /// Directories are walked into, never yielded
    Directory,
    /// The ignore set matched the path
    Excluded,
}

/// Walks every root depth-first and sends each non-excluded file path.
///
/// Roots are walked sequentially; the channel closes (by dropping the
/// sender) only after the last root completes. Per-entry traversal errors
/// skip that entry and the walk continues with its siblings.
pub(crate) fn walk_roots(roots: &[PathBuf], filter: &IgnoreSet, paths: Sender<PathBuf>) {
    for root in roots {
        for entry in WalkDir::new(root) {
            match consider(entry, filter) {
                Ok(path) => {
                    if paths.send(path).is_err() {
                        // Every worker is gone; nothing left to feed.
                        return;
                    }
                }
                Err(_skip) => continue,
            }
        }
    }
}

/// Decides whether one walk entry becomes a search path.
///
/// Anything that reports itself as "not a directory" (regular files,
/// symlinks, special files) is offered to the filter.
fn consider(
    entry: Result<walkdir::DirEntry, walkdir::Error>,
    filter: &IgnoreSet,
) -> Result<PathBuf, Skip> {
    let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
            debug!("skipping unreadable entry: {e}");
            return Err(Skip::WalkError);
        }
    };
    if entry.file_type().is_dir() {
        return Err(Skip::Directory);
    }
    let path = clean_path(entry.path());
    if filter.exclude(&path) {
        trace!("excluded: {}", path.display());
        return Err(Skip::Excluded);
    }
    Ok(path)
}

/// Strips a leading `./` component so paths under the default root come
/// out bare, keeping the leading-dot filter rule from matching the root
/// prefix itself.
fn clean_path(path: &Path) -> PathBuf {
    match path.strip_prefix(".") {
        Ok(stripped) => stripped.to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}
