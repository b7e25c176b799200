// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `docs` command.

use tracing::{info, warn};

use super::load_scope;
use crate::cli::global::GlobalOptions;
use crate::cli::project::DocsArgs;
use crate::config::Config;
use crate::docs::{DocsRequest, run_docs};
use crate::error::Result;

/// Runs the documentation generator for the `--project` project.
///
/// # Errors
///
/// Returns an error if the generator is missing or fails, or if the change
/// detection cannot query git.
pub async fn run_docs_command(args: &DocsArgs, global: &GlobalOptions, config: &Config) -> Result<()> {
    let options = config.scope_options();
    let context = load_scope(global, &options)?;
    let request = DocsRequest::from_config(
        &config.docs,
        args.output_folder.clone(),
        args.skip,
        options.pretend,
    );

    let report = run_docs(context.tree(), context.project(), &request).await?;
    if !report.changed.is_empty() {
        info!(
            committed = report.commits.committed.len(),
            "Documentation modified {} checkouts",
            report.changed.len()
        );
    }
    for (checkout, message) in &report.commits.failed {
        warn!(checkout = %checkout, "Commit failed: {message}");
    }
    Ok(())
}
