// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `filter-families` command.

use std::sync::Arc;

use tracing::info;

use crate::cli::global::GlobalOptions;
use crate::cli::project::FilterFamiliesArgs;
use crate::config::Config;
use crate::error::Result;
use crate::git::GixBackend;
use crate::project::ProjectTree;
use crate::workflow::{requested_families, skip_properties, split_properties};

/// Prints one `<groupId>:<artifactId> <property>=true` line per project
/// outside the requested families and property.
///
/// # Errors
///
/// Returns an error if the workspace cannot be scanned.
pub fn run_filter_families_command(
    args: &FilterFamiliesArgs,
    global: &GlobalOptions,
    config: &Config,
) -> Result<()> {
    let family = args.family.as_deref().or(config.scope.family.as_deref());
    let families = requested_families(family, args.families.as_deref());
    let properties = args
        .properties
        .as_deref()
        .map(split_properties)
        .unwrap_or_default();
    if families.is_empty() || properties.is_empty() {
        info!("No families or no properties given, nothing to filter");
        return Ok(());
    }

    let tree = ProjectTree::for_project_dir(global.project_dir(), Arc::new(GixBackend))?;
    for line in skip_properties(&tree, &families, &properties) {
        println!("{line}");
    }
    Ok(())
}
