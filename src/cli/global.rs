// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE      ← Additional config files (can repeat)
//! --pretend          ← Log mutations instead of performing them
//! --log-level N      ← Console verbosity (0-5)
//! --file-log-level N ← File verbosity (defaults to --log-level)
//! --log-file FILE    ← Also log to FILE
//! --project DIR      ← Maven project to start from
//!
//! Precedence: CLI flags > CACTUS_* env > --config > ./cactus.toml > defaults
//! ```

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::ConfigLoader;
use crate::error::Result;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Additional TOML configuration file(s), loaded in order.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        action = clap::ArgAction::Append,
        global = true
    )]
    pub configs: Vec<PathBuf>,

    /// Logs every repository mutation without performing it.
    #[arg(long, global = true)]
    pub pretend: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        value_parser = clap::value_parser!(u8).range(0..=5),
        global = true
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(
        long = "file-log-level",
        value_name = "LEVEL",
        value_parser = clap::value_parser!(u8).range(0..=5),
        global = true
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Directory of the Maven project to operate from.
    #[arg(short = 'p', long = "project", value_name = "DIR", global = true)]
    pub project: Option<PathBuf>,
}

impl GlobalOptions {
    /// Project directory, the current directory when unset.
    #[must_use]
    pub fn project_dir(&self) -> &Path {
        self.project.as_deref().unwrap_or_else(|| Path::new("."))
    }

    /// Adds `--config` files and `[global]` overrides to `loader`.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be recorded.
    pub fn apply(&self, loader: ConfigLoader) -> Result<ConfigLoader> {
        let loader = self
            .configs
            .iter()
            .fold(loader, |loader, path| loader.add_toml_file(path));

        loader
            .set_if("global.output_log_level", self.log_level)?
            // file level falls back to the console level
            .set_if("global.file_log_level", self.file_log_level.or(self.log_level))?
            .set_if(
                "global.log_file",
                self.log_file.as_ref().map(|p| p.display().to_string()),
            )?
            .set_if("global.pretend", self.pretend.then_some(true))
    }
}
