//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Streaming content fingerprinting of submitted paths
//! - First-seen bookkeeping (visited set, keeper table)
//! - The shorter-base-name tie-break between identical files
//!
//! See [`Deduper`] for the engine itself.

pub mod deduper;

use std::path::PathBuf;

pub use deduper::{DedupStats, Deduper};

/// Errors that can occur while fingerprinting a submitted path.
#[derive(thiserror::Error, Debug)]
pub enum DedupError {
    /// The path could not be resolved to an absolute form.
    #[error("cannot resolve {path}: {source}")]
    Resolve {
        /// Path as submitted
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Metadata for the path could not be read.
    #[error("cannot stat {path}: {source}")]
    Metadata {
        /// Absolute path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file could not be opened or read while hashing.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Absolute path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl DedupError {
    /// The path associated with this error.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Resolve { path, .. } | Self::Metadata { path, .. } | Self::Io { path, .. } => {
                path
            }
        }
    }
}
