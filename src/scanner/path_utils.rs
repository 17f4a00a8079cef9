//! Path normalization utilities.
//!
//! Every path that reaches the dedup bookkeeping goes through [`absolutize`],
//! so two spellings of the same file (`a/../a/x.bin`, `./a/x.bin`, the
//! absolute form) collapse to one identity.
//!
//! Normalization is purely lexical: `.` components are dropped and `..`
//! removes the preceding component. Symbolic links are never resolved.
//!
//! # Example
//!
//! ```
//! use rmdupes::scanner::path_utils::clean;
//! use std::path::{Path, PathBuf};
//!
//! assert_eq!(clean(Path::new("/data/./a/../b.bin")), PathBuf::from("/data/b.bin"));
//! ```

use std::ffi::OsStr;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolve `path` to an absolute, lexically cleaned path.
///
/// Relative paths are resolved against the process working directory.
///
/// # Errors
///
/// Returns an error if the path is relative and the current working
/// directory cannot be determined.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(clean(path));
    }
    let cwd = std::env::current_dir()?;
    Ok(clean(&cwd.join(path)))
}

/// Lexically clean a path.
///
/// `..` never climbs above the root of an absolute path. For relative paths
/// leading `..` components are kept.
#[must_use]
pub fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir | Component::CurDir) | None => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Length in bytes of the final path component.
///
/// Paths without a file name (`/`, `..`) have length 0.
#[must_use]
pub fn base_name_len(path: &Path) -> usize {
    path.file_name()
        .map_or(0, |name| name.as_encoded_bytes().len())
}

/// Check whether a file name marks a hidden entry (starts with `.`).
#[must_use]
pub fn is_hidden_name(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}
