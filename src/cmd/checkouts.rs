// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `checkouts`: print what a scope resolves to.

use tracing::{info, warn};

use super::load_scope;
use crate::cli::global::GlobalOptions;
use crate::cli::scope::CheckoutsArgs;
use crate::config::Config;
use crate::error::Result;
use crate::workflow::ensure_clean;

/// Prints `<name>\t<path>` per checkout, in resolution order.
///
/// # Errors
///
/// Returns an error if the workspace cannot be scanned, or if
/// `--require-clean` is set and a checkout is modified.
pub fn run_checkouts_command(
    args: &CheckoutsArgs,
    global: &GlobalOptions,
    config: &Config,
) -> Result<()> {
    let options = config.scope_options();
    let context = load_scope(global, &options)?;
    let checkouts = context.resolve(&options);
    info!(
        project = %context.project(),
        scope = %options.scope,
        family = %context.family(),
        "Have {} checkouts",
        checkouts.len()
    );
    if checkouts.is_empty() {
        warn!("No checkouts matched, nothing to do");
        return Ok(());
    }
    if args.require_clean {
        ensure_clean(&checkouts)?;
    }
    for checkout in &checkouts {
        println!("{}\t{}", checkout.name(), checkout.root().display());
    }
    Ok(())
}
