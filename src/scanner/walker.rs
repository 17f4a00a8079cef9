//! Directory walker built on walkdir.
//!
//! # Overview
//!
//! The [`Walker`] visits every regular file under a root, one at a time and
//! in a stable order, handing each absolute path to a callback. The walk is
//! single-threaded and synchronous: the callback runs to completion before
//! the next directory entry is read.
//!
//! # Policy
//!
//! - A root that is itself a regular file is yielded as-is.
//! - Entries are sorted by file name within each directory.
//! - Directories, symlinks and special files are never yielded. Symlinked
//!   directories are not followed.
//! - Without [`WalkFlags::recursive`] only the root's own entries are visited.
//! - Without [`WalkFlags::include_hidden`] dot-entries are skipped and
//!   dot-directories pruned. The root itself is never filtered.
//! - The first error, from the filesystem or from the callback, ends the walk.
//!
//! # Example
//!
//! ```no_run
//! use rmdupes::scanner::{ScanError, WalkFlags, Walker};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkFlags::new());
//! let mut count = 0;
//! walker
//!     .walk(|_path| -> Result<(), ScanError> {
//!         count += 1;
//!         Ok(())
//!     })
//!     .unwrap();
//! println!("Found {} files", count);
//! ```

use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::{DirEntry, WalkDir};

use super::path_utils::{absolutize, is_hidden_name};
use super::{ScanError, WalkFlags};

/// Directory walker for sequential file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Traversal policy
    flags: WalkFlags,
    /// Optional shutdown flag for graceful termination
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root file or directory, relative or absolute
    /// * `flags` - Traversal policy
    #[must_use]
    pub fn new(path: &Path, flags: WalkFlags) -> Self {
        Self {
            root: path.to_path_buf(),
            flags,
            shutdown_flag: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// Once the flag is `true` the walk stops before the next entry and
    /// returns [`ScanError::Interrupted`].
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Check if shutdown has been requested.
    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Walk the tree, calling `on_file` with the absolute path of every
    /// qualifying regular file.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `on_file` unchanged, or a
    /// [`ScanError`] (converted into `E`) if the root cannot be resolved,
    /// a directory cannot be read, or shutdown was requested.
    pub fn walk<F, E>(&self, mut on_file: F) -> Result<(), E>
    where
        F: FnMut(&Path) -> Result<(), E>,
        E: From<ScanError>,
    {
        let root = absolutize(&self.root).map_err(|source| ScanError::Io {
            path: self.root.clone(),
            source,
        })?;

        let mut walk_dir = WalkDir::new(&root).follow_links(false).sort_by_file_name();
        if !self.flags.recursive {
            walk_dir = walk_dir.max_depth(1);
        }

        let include_hidden = self.flags.include_hidden;
        let entries = walk_dir
            .into_iter()
            .filter_entry(move |entry| entry.depth() == 0 || include_hidden || !is_hidden(entry));

        for entry in entries {
            if self.is_shutdown_requested() {
                log::debug!("Walker: Shutdown requested, stopping iteration");
                return Err(ScanError::Interrupted.into());
            }

            let entry = entry.map_err(|e| walk_error(&root, e))?;
            if !entry.file_type().is_file() {
                log::trace!("Skipping non-regular entry: {}", entry.path().display());
                continue;
            }

            on_file(entry.path())?;
        }
        Ok(())
    }
}

/// Walk `root` with `flags`, calling `on_file` for each regular file.
///
/// Shorthand for `Walker::new(root, flags).walk(on_file)`.
///
/// # Errors
///
/// See [`Walker::walk`].
pub fn walk<F, E>(root: &Path, flags: WalkFlags, on_file: F) -> Result<(), E>
where
    F: FnMut(&Path) -> Result<(), E>,
    E: From<ScanError>,
{
    Walker::new(root, flags).walk(on_file)
}

fn is_hidden(entry: &DirEntry) -> bool {
    let hidden = is_hidden_name(entry.file_name());
    if hidden {
        log::trace!("Skipping hidden entry: {}", entry.path().display());
    }
    hidden
}

/// Convert a walkdir error into a [`ScanError`].
fn walk_error(root: &Path, error: walkdir::Error) -> ScanError {
    let path = error
        .path()
        .map_or_else(|| root.to_path_buf(), Path::to_path_buf);

    let kind = error.io_error().map(io::Error::kind);
    let source = io::Error::from(error);
    match kind {
        Some(ErrorKind::PermissionDenied) => {
            log::warn!("Permission denied: {}", path.display());
            ScanError::PermissionDenied { path, source }
        }
        Some(ErrorKind::NotFound) => {
            log::debug!("Path not found: {}", path.display());
            ScanError::NotFound { path, source }
        }
        _ => {
            log::warn!("Walker error for {}: {}", path.display(), source);
            ScanError::Io { path, source }
        }
    }
}
