//! Application configuration management.
//!
//! Settings are merged from several layers, later ones winning:
//!
//! 1. Built-in defaults
//! 2. TOML config file (`--config`, or `config.toml` in the platform config dir)
//! 3. `RMDUPES_*` environment variables (e.g. `RMDUPES_HASH=blake3`)
//! 4. Command-line flags
//!
//! ```toml
//! hash = "blake3"
//! recursive = true
//! hidden = false
//! print_only = true
//! trash = false
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::actions::DuplicateAction;
use crate::cli::Cli;
use crate::scanner::{HashAlgorithm, WalkFlags};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "RMDUPES_";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Digest used to fingerprint file content.
    pub hash: HashAlgorithm,
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Include hidden files and directories.
    pub hidden: bool,
    /// Print duplicates without removing them.
    pub print_only: bool,
    /// Move duplicates to the trash instead of deleting them.
    pub trash: bool,
}

impl Config {
    /// Build the layered provider: defaults, then `file` (if any), then env.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load the configuration.
    ///
    /// An `explicit` file must exist. Without one, the platform default
    /// path is used if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file is missing or any layer holds
    /// an invalid value.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let file = match explicit {
            Some(path) => {
                if !path.is_file() {
                    anyhow::bail!("config file not found: {}", path.display());
                }
                Some(path.to_path_buf())
            }
            None => Self::default_path().filter(|p| p.is_file()),
        };

        if let Some(path) = &file {
            log::debug!("Loading config from {}", path.display());
        }

        Self::figment(file.as_deref())
            .extract()
            .context("invalid configuration")
    }

    /// Default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "rmdupes").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Apply command-line flags on top of this configuration.
    ///
    /// Switches only turn options on; `--hash` replaces the algorithm.
    #[must_use]
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(hash) = cli.hash {
            self.hash = hash;
        }
        self.recursive |= cli.recursive;
        self.hidden |= cli.hidden;
        self.print_only |= cli.print_only;
        self.trash |= cli.trash;
        self
    }

    /// Traversal flags for the walker.
    #[must_use]
    pub fn walk_flags(&self) -> WalkFlags {
        WalkFlags::new()
            .with_recursive(self.recursive)
            .with_hidden(self.hidden)
    }

    /// Action applied to each duplicate.
    #[must_use]
    pub fn action(&self) -> DuplicateAction {
        DuplicateAction::from_flags(self.print_only, self.trash)
    }
}
