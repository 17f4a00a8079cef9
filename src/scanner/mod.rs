//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Deterministic directory walking using walkdir
//! - Streaming content hashing (MD5, SHA-1, SHA-2, BLAKE3)
//! - Lexical path normalization
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: Streaming digests behind the [`ContentHasher`] trait
//! - [`path_utils`]: Absolute path resolution and base-name helpers
//!
//! # Example
//!
//! ```no_run
//! use rmdupes::scanner::{walk, ScanError, WalkFlags};
//! use std::path::Path;
//!
//! let flags = WalkFlags::new().with_recursive(true);
//! walk(Path::new("."), flags, |path| -> Result<(), ScanError> {
//!     println!("{}", path.display());
//!     Ok(())
//! })
//! .unwrap();
//! ```

pub mod hasher;
pub mod path_utils;
pub mod walker;

use std::path::PathBuf;

// Re-export main types
pub use hasher::{hash_reader, to_hex, ContentHasher, Fingerprint, HashAlgorithm, Hasher};
pub use walker::{walk, Walker};

/// Traversal policy for the [`Walker`].
///
/// Both options are off by default: only the non-hidden files directly
/// inside the root are visited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkFlags {
    /// Descend into subdirectories beyond the first level.
    pub recursive: bool,

    /// Visit entries whose name starts with `.`.
    /// When off, hidden directories are not descended into.
    pub include_hidden: bool,
}

impl WalkFlags {
    /// Flags with recursion and hidden entries both disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable recursion.
    #[must_use]
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Enable or disable hidden entries.
    #[must_use]
    pub fn with_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {path}")]
    PermissionDenied {
        /// Path that could not be read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The specified path was not found.
    #[error("Path not found: {path}")]
    NotFound {
        /// Path that does not exist
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The walk was stopped by a shutdown request (Ctrl+C).
    #[error("Scan interrupted")]
    Interrupted,
}
