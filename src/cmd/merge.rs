// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `merge` command.

use tracing::{error, info};

use super::load_scope;
use crate::cli::global::GlobalOptions;
use crate::cli::merge::MergeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::project::ProjectFamily;
use crate::workflow::{MergeFlags, MergeRequest, MergeRunner, apply_families, ensure_clean};

/// Flags implied by `[merge]` and pretend mode.
#[must_use]
pub fn merge_flags(config: &Config) -> MergeFlags {
    let mut flags = MergeFlags::empty();
    flags.set(MergeFlags::TAG, config.merge.tag);
    flags.set(MergeFlags::DELETE_MERGED, config.merge.delete_merged);
    flags.set(MergeFlags::PUSH, config.merge.push);
    flags.set(MergeFlags::PRETEND, config.global.pretend);
    flags
}

/// Validates, resolves checkouts and runs the merge.
///
/// Per-checkout failures are logged and reported; they do not fail the
/// command.
///
/// # Errors
///
/// Returns a `ConfigError` for invalid branch names or `--families` with a
/// scope other than `family`, and a `GitError` when clean checkouts are
/// required but some are modified. Both happen before any mutation.
pub fn run_merge_command(args: &MergeArgs, global: &GlobalOptions, config: &Config) -> Result<()> {
    let request = MergeRequest::builder()
        .maybe_with_from(args.from.clone())
        .with_into(config.merge.into.clone())
        .maybe_with_also_into(args.also_into.clone())
        .with_flags(merge_flags(config))
        .build();
    request.validate()?;

    let options = config.scope_options();
    let context = load_scope(global, &options)?;
    let families = args
        .families
        .as_deref()
        .map(ProjectFamily::from_comma_delimited)
        .unwrap_or_default();
    let checkouts = apply_families(
        context.tree(),
        options.scope,
        options.include_root,
        context.family(),
        &families,
        context.resolve(&options),
    )?;
    if config.merge.require_clean {
        ensure_clean(&checkouts)?;
    }

    let report = MergeRunner::new(context.tree(), request).run(&checkouts);
    info!(
        merged = report.merged.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "Merge finished"
    );
    for (checkout, message) in &report.failed {
        error!(checkout = %checkout, "{message}");
    }
    Ok(())
}
