//! Progress reporting using indicatif.
//!
//! A single spinner on stderr counts scanned files and reported duplicates.
//! Anything written to stdout while the spinner is live must go through
//! [`Progress::suspend`] so the two streams do not interleave on a terminal.

use std::cell::Cell;
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Scan progress spinner. Does nothing when created quiet.
#[derive(Debug)]
pub struct Progress {
    bar: Option<ProgressBar>,
    duplicates: Cell<u64>,
}

impl Progress {
    /// Create a progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, nothing is displayed.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        let bar = (!quiet).then(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {pos} files {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner())
                    .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
            );
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        Self {
            bar,
            duplicates: Cell::new(0),
        }
    }

    /// Record one scanned file.
    pub fn on_file(&self, path: &Path) {
        if let Some(pb) = &self.bar {
            pb.inc(1);
            if self.duplicates.get() == 0 {
                pb.set_message(truncate_path(path, 40));
            }
        }
    }

    /// Record one reported duplicate.
    pub fn on_duplicate(&self) {
        let count = self.duplicates.get() + 1;
        self.duplicates.set(count);
        if let Some(pb) = &self.bar {
            pb.set_message(format!("({count} duplicates)"));
        }
    }

    /// Run `f` with the spinner hidden.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        match &self.bar {
            Some(pb) => pb.suspend(f),
            None => f(),
        }
    }

    /// Remove the spinner from the terminal.
    pub fn finish(&self) {
        if let Some(pb) = &self.bar {
            pb.finish_and_clear();
        }
    }
}

/// Truncate a path for display next to the spinner.
fn truncate_path(path: &Path, max_len: usize) -> String {
    let full = path.to_string_lossy();
    if full.chars().count() <= max_len {
        return full.into_owned();
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let chars: Vec<char> = file_name.chars().collect();
    if chars.len() + 4 > max_len {
        let tail: String = chars[chars.len().saturating_sub(max_len.saturating_sub(3))..]
            .iter()
            .collect();
        return format!("...{tail}");
    }

    format!(".../{file_name}")
}
