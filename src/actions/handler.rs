//! Duplicate handling: print the path, then optionally remove the file.
//!
//! [`DuplicateHandler::handle`] is what the orchestrator plugs into the
//! dedup engine as its duplicate callback.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::delete::{delete_to_trash, permanent_delete, DeleteError};

/// What to do with a reported duplicate after printing it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateAction {
    /// Only print the path.
    Print,
    /// Delete the file permanently.
    #[default]
    Remove,
    /// Move the file to the system trash.
    Trash,
}

impl DuplicateAction {
    /// Pick the action from the `print_only` / `trash` switches.
    /// Printing wins over trashing.
    #[must_use]
    pub fn from_flags(print_only: bool, trash: bool) -> Self {
        match (print_only, trash) {
            (true, _) => Self::Print,
            (false, true) => Self::Trash,
            (false, false) => Self::Remove,
        }
    }
}

/// Errors raised while handling a duplicate.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// Writing the path to the output failed (e.g. closed pipe).
    #[error("cannot write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Removing the file failed.
    #[error(transparent)]
    Delete(#[from] DeleteError),
}

/// Running totals for the end-of-run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionSummary {
    /// Duplicates reported
    pub reported: usize,
    /// Duplicates actually removed (permanently or to trash)
    pub removed: usize,
    /// Bytes freed by removals
    pub bytes_freed: u64,
}

/// Prints each duplicate to `out` and applies the configured action.
#[derive(Debug)]
pub struct DuplicateHandler<W> {
    action: DuplicateAction,
    out: W,
    summary: ActionSummary,
}

impl<W: Write> DuplicateHandler<W> {
    /// Create a handler writing paths to `out`.
    pub fn new(action: DuplicateAction, out: W) -> Self {
        Self {
            action,
            out,
            summary: ActionSummary::default(),
        }
    }

    /// Print `path` on its own line, then apply the action.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Output`] if the path cannot be written and
    /// [`ActionError::Delete`] if removal fails.
    pub fn handle(&mut self, path: &Path) -> Result<(), ActionError> {
        writeln!(self.out, "{}", path.display())
            .and_then(|()| self.out.flush())
            .map_err(|source| ActionError::Output {
                path: path.to_path_buf(),
                source,
            })?;
        self.summary.reported += 1;

        let result = match self.action {
            DuplicateAction::Print => return Ok(()),
            DuplicateAction::Remove => permanent_delete(path)?,
            DuplicateAction::Trash => delete_to_trash(path)?,
        };
        self.summary.removed += 1;
        self.summary.bytes_freed += result.size;
        Ok(())
    }

    /// The configured action.
    #[must_use]
    pub fn action(&self) -> DuplicateAction {
        self.action
    }

    /// Totals so far.
    #[must_use]
    pub fn summary(&self) -> &ActionSummary {
        &self.summary
    }

    /// Consume the handler, returning the writer and the totals.
    pub fn into_parts(self) -> (W, ActionSummary) {
        (self.out, self.summary)
    }
}
