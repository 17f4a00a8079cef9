//! rmdupes - Remove duplicated files by content hash
//!
//! Walks one or more roots in a deterministic order, fingerprints every
//! regular file with a streaming digest and reports each file whose content
//! was already seen. Of two identical files the one with the shorter base
//! name is kept. Reported files are printed and, unless asked otherwise,
//! removed.

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod progress;
pub mod scanner;
pub mod signal;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::{Context, Result};
use bytesize::ByteSize;
use clap::CommandFactory;

use crate::actions::{ActionSummary, DuplicateHandler};
use crate::cli::Cli;
use crate::config::Config;
use crate::duplicates::{DedupStats, Deduper};
use crate::error::ExitCode;
use crate::progress::Progress;
use crate::scanner::{Hasher, Walker};

/// Totals for one run over all roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Engine counters
    pub dedup: DedupStats,
    /// Action counters
    pub actions: ActionSummary,
}

/// Run the application with parsed arguments.
///
/// # Errors
///
/// Returns the first fatal error: bad configuration, a traversal or hashing
/// failure, a failed removal, or an interruption.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    if cli.paths.is_empty() {
        eprint!("{}", Cli::command().render_help());
        return Ok(ExitCode::Success);
    }

    logging::init_logging(cli.verbose, cli.quiet, !cli.no_color);
    if cli.no_color {
        yansi::disable();
    }

    let config = Config::load(cli.config.as_deref())?.with_cli(&cli);
    log::debug!("Effective configuration: {config:?}");

    let shutdown = signal::install_handler()?;
    let progress = Progress::new(cli.quiet);

    let report = dedupe_paths(
        &cli.paths,
        &config,
        io::stdout(),
        Some(shutdown.get_flag()),
        &progress,
    );
    progress.finish();
    let report = report?;

    log::info!(
        "{} files fingerprinted ({}), {} duplicates, {} removed, {} freed",
        report.dedup.hashed,
        ByteSize::b(report.dedup.bytes_hashed),
        report.dedup.duplicates,
        report.actions.removed,
        ByteSize::b(report.actions.bytes_freed)
    );

    Ok(ExitCode::Success)
}

/// Process `roots` in order with one shared engine.
///
/// Duplicates are printed to `out` and then handled according to
/// `config`. A file seen under an earlier root can make a file under a
/// later root a duplicate, and vice versa.
///
/// # Errors
///
/// Stops at the first error from any root and returns it.
pub fn dedupe_paths<W: Write>(
    roots: &[PathBuf],
    config: &Config,
    out: W,
    shutdown: Option<Arc<AtomicBool>>,
    progress: &Progress,
) -> Result<RunReport> {
    let flags = config.walk_flags();
    let mut handler = DuplicateHandler::new(config.action(), out);
    log::debug!(
        "Using {} with action {:?}",
        config.hash,
        handler.action()
    );

    let dedup = {
        let mut deduper = Deduper::new(Hasher::new(config.hash), |path: &Path| -> Result<()> {
            progress.on_duplicate();
            progress.suspend(|| handler.handle(path))?;
            Ok(())
        });

        for root in roots {
            let mut walker = Walker::new(root, flags);
            if let Some(flag) = &shutdown {
                walker = walker.with_shutdown_flag(Arc::clone(flag));
            }
            log::debug!("Processing {}", root.display());
            walker
                .walk(|path| -> Result<()> {
                    progress.on_file(path);
                    deduper.submit(path)
                })
                .with_context(|| format!("failed to process {}", root.display()))?;
        }

        deduper.stats().clone()
    };

    let (_, actions) = handler.into_parts();
    Ok(RunReport { dedup, actions })
}
