//! Command-line interface definitions for rmdupes.
//!
//! # Example
//!
//! ```bash
//! # Remove duplicated files directly inside ~/Downloads
//! rmdupes ~/Downloads
//!
//! # Only print duplicates, descending into subdirectories and dotfiles
//! rmdupes --print -r --hidden ~/Pictures ~/Backup
//!
//! # Use BLAKE3 and move duplicates to the trash
//! rmdupes --hash blake3 --trash ~/Downloads
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::scanner::HashAlgorithm;

/// Remove duplicated files by content hash.
///
/// Files are compared by a digest of their full content. Of two identical
/// files the one with the shorter file name is kept; the other is printed
/// and removed.
#[derive(Debug, Parser)]
#[command(name = "rmdupes")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Files or directories to process
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Hash to detect duplicated files [default: sha512]
    #[arg(long, value_enum, value_name = "ALGORITHM")]
    pub hash: Option<HashAlgorithm>,

    /// Only print files instead of removing
    #[arg(short, long = "print")]
    pub print_only: bool,

    /// Move duplicates to the system trash instead of deleting them
    #[arg(long, conflicts_with = "print_only")]
    pub trash: bool,

    /// Process hidden (starting with dot) files/directories
    #[arg(long)]
    pub hidden: bool,

    /// Process files recursively (descend into inner dirs)
    #[arg(short, long)]
    pub recursive: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and duplicate paths
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Report fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}
