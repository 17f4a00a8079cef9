//! Streaming duplicate detection engine.
//!
//! # Overview
//!
//! A [`Deduper`] is fed one path at a time. For every regular file it has
//! not seen before it computes a content fingerprint and checks it against
//! the table of keepers (one path per distinct fingerprint):
//!
//! - new fingerprint: the path becomes the keeper;
//! - known fingerprint: the two paths are compared by base-name length.
//!   The strictly shorter name is kept, the other one is handed to the
//!   duplicate callback. On a tie the earlier path stays the keeper.
//!
//! The engine never touches the filesystem beyond reading. What happens to
//! a reported duplicate (printing, deletion) is up to the callback.
//!
//! # Example
//!
//! ```no_run
//! use rmdupes::duplicates::{DedupError, Deduper};
//! use rmdupes::scanner::{HashAlgorithm, Hasher};
//! use std::path::Path;
//!
//! let mut deduper = Deduper::new(
//!     Hasher::new(HashAlgorithm::Sha512),
//!     |path: &Path| -> Result<(), DedupError> {
//!         println!("duplicate: {}", path.display());
//!         Ok(())
//!     },
//! );
//! deduper.submit(Path::new("photo.jpg")).unwrap();
//! deduper.submit(Path::new("photo (copy).jpg")).unwrap();
//! ```

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use super::DedupError;
use crate::scanner::hasher::{hash_reader, to_hex, ContentHasher, Fingerprint, READ_BUFFER_SIZE};
use crate::scanner::path_utils::{absolutize, base_name_len};

/// Counters describing what a [`Deduper`] has done so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupStats {
    /// Calls to [`Deduper::submit`]
    pub submitted: usize,
    /// Submissions ignored because the path is not a regular file (or is gone)
    pub skipped: usize,
    /// Submissions ignored because the path was already visited
    pub repeated: usize,
    /// Files whose content was fingerprinted
    pub hashed: usize,
    /// Total bytes read while fingerprinting
    pub bytes_hashed: u64,
    /// Duplicates handed to the callback
    pub duplicates: usize,
    /// Times a keeper was replaced by a shorter-named copy
    pub keepers_replaced: usize,
}

/// Fingerprint-based duplicate detector.
///
/// Owns the visited set, the keeper table, the hasher and the read buffer
/// for one run. Not meant to be shared between threads; all mutation goes
/// through `&mut self`.
pub struct Deduper<H, F> {
    hasher: H,
    on_duplicate: F,
    /// Absolute paths already submitted and accepted as regular files
    visited: HashSet<PathBuf>,
    /// Keeper path for each distinct fingerprint
    originals: HashMap<Fingerprint, PathBuf>,
    buffer: Box<[u8]>,
    stats: DedupStats,
}

impl<H, F> Deduper<H, F>
where
    H: ContentHasher,
{
    /// Create an engine with empty bookkeeping.
    ///
    /// # Arguments
    ///
    /// * `hasher` - Hash primitive used for every fingerprint
    /// * `on_duplicate` - Called once per duplicate with the path to dispose of
    #[must_use]
    pub fn new<E>(hasher: H, on_duplicate: F) -> Self
    where
        F: FnMut(&Path) -> Result<(), E>,
    {
        Self {
            hasher,
            on_duplicate,
            visited: HashSet::new(),
            originals: HashMap::new(),
            buffer: vec![0u8; READ_BUFFER_SIZE].into_boxed_slice(),
            stats: DedupStats::default(),
        }
    }

    /// Submit a path for duplicate detection.
    ///
    /// Relative paths are resolved against the working directory. Paths
    /// that are not regular files, no longer exist, or were already
    /// submitted are ignored.
    ///
    /// # Errors
    ///
    /// - [`DedupError::Resolve`] if the path cannot be made absolute
    /// - [`DedupError::Metadata`] if the path cannot be stat'ed
    /// - [`DedupError::Io`] if the file cannot be opened or read; the path
    ///   stays visited and later submissions of it are no-ops
    /// - whatever the duplicate callback returns, unchanged
    pub fn submit<E>(&mut self, path: &Path) -> Result<(), E>
    where
        F: FnMut(&Path) -> Result<(), E>,
        E: From<DedupError>,
    {
        self.stats.submitted += 1;

        let path = absolutize(path).map_err(|source| DedupError::Resolve {
            path: path.to_path_buf(),
            source,
        })?;

        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Skipping vanished path: {}", path.display());
                self.stats.skipped += 1;
                return Ok(());
            }
            Err(source) => return Err(DedupError::Metadata { path, source }.into()),
        };
        if !metadata.is_file() {
            log::trace!("Skipping non-regular path: {}", path.display());
            self.stats.skipped += 1;
            return Ok(());
        }

        if !self.visited.insert(path.clone()) {
            log::trace!("Already visited: {}", path.display());
            self.stats.repeated += 1;
            return Ok(());
        }

        let fingerprint = self.fingerprint(&path)?;

        match self.originals.entry(fingerprint) {
            Entry::Vacant(slot) => {
                slot.insert(path);
                Ok(())
            }
            Entry::Occupied(mut slot) => {
                let disposable = if base_name_len(slot.get()) > base_name_len(&path) {
                    log::debug!(
                        "Keeping shorter name {} over {}",
                        path.display(),
                        slot.get().display()
                    );
                    self.stats.keepers_replaced += 1;
                    slot.insert(path)
                } else {
                    path
                };
                log::debug!(
                    "Duplicate of {}: {}",
                    slot.get().display(),
                    disposable.display()
                );
                self.stats.duplicates += 1;
                (self.on_duplicate)(&disposable)
            }
        }
    }

    /// Hash the full content of `path`. The file handle is closed on return.
    fn fingerprint(&mut self, path: &Path) -> Result<Fingerprint, DedupError> {
        let io_error = |source: io::Error| DedupError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_error)?;
        let (fingerprint, bytes) =
            hash_reader(&mut self.hasher, &mut file, &mut self.buffer).map_err(io_error)?;

        self.stats.hashed += 1;
        self.stats.bytes_hashed += bytes;
        log::trace!("{} {}", to_hex(&fingerprint), path.display());
        Ok(fingerprint)
    }

    /// Counters for this run.
    #[must_use]
    pub fn stats(&self) -> &DedupStats {
        &self.stats
    }

    /// Number of distinct fingerprints seen.
    #[must_use]
    pub fn keeper_count(&self) -> usize {
        self.originals.len()
    }

    /// Whether `path` (after normalization) has been visited.
    #[must_use]
    pub fn is_visited(&self, path: &Path) -> bool {
        absolutize(path).is_ok_and(|p| self.visited.contains(&p))
    }

    /// Current keeper paths, in no particular order.
    pub fn keepers(&self) -> impl Iterator<Item = &Path> + '_ {
        self.originals.values().map(PathBuf::as_path)
    }
}

impl<H, F> std::fmt::Debug for Deduper<H, F>
where
    H: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deduper")
            .field("hasher", &self.hasher)
            .field("on_duplicate", &"<callback>")
            .field("visited", &self.visited.len())
            .field("keepers", &self.originals.len())
            .field("stats", &self.stats)
            .finish()
    }
}
