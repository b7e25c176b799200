// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args + Config --> cmd::run_* handlers
//!   checkouts, merge, docs, codeflowers, filter-families, metadata, options
//!
//! load_config(cli)      defaults < ./cactus.toml < --config < CACTUS_* < flags
//! load_scope(global)    ScopeContext over the git CLI backend
//! ```

pub mod checkouts;
pub mod codeflowers;
pub mod config;
pub mod docs;
pub mod families;
pub mod merge;
pub mod metadata;


use std::sync::Arc;

use tracing::debug;

use crate::cli::Cli;
use crate::cli::global::GlobalOptions;
use crate::config::{Config, ENV_PREFIX, LOCAL_CONFIG_FILE};
use crate::error::Result;
use crate::git::{GitBackend, GixBackend};
use crate::project::{ScopeContext, ScopeOptions};

/// Builds the effective configuration for `cli`.
///
/// # Errors
///
/// Returns a `ConfigError` if a file is missing or invalid, or a value does
/// not fit its section.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let loader = Config::builder()
        .add_toml_file_optional(LOCAL_CONFIG_FILE)
        .with_env_prefix(ENV_PREFIX);
    let loader = cli.global.apply(loader)?;
    let loader = match &cli.command {
        Some(command) => command.apply(loader)?,
        None => loader,
    };
    for line in loader.format_loaded_files() {
        debug!("config {line}");
    }
    loader.build()
}

/// Scans the workspace around the `--project` directory.
pub(crate) fn load_scope(global: &GlobalOptions, options: &ScopeOptions) -> Result<ScopeContext> {
    let git: Arc<dyn GitBackend> = Arc::new(GixBackend);
    ScopeContext::load(global.project_dir(), git, options)
}
