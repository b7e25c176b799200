// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `codeflowers` command.
//!
//! ```text
//! checkouts (scope | --families)
//!   -> non-pom projects by family
//!   -> per family: version check, assets root (else skip)
//!   -> ProjectsScanner(WordCount) -> CodeflowersWriter
//! ```

use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::{info, warn};

use super::load_scope;
use crate::cli::global::GlobalOptions;
use crate::cli::project::CodeflowersArgs;
use crate::config::Config;
use crate::error::Result;
use crate::project::{Pom, ProjectFamily};
use crate::scan::codeflowers::{
    CodeflowersWriter, checkouts_in_families, data_dir, family_version, projects_by_family,
};
use crate::scan::{ProjectsScanner, WordCount};

struct FamilyJob {
    family: ProjectFamily,
    projects: Vec<Pom>,
    output_dir: PathBuf,
}

/// Scans every family in scope and writes its `CodeFlowers` data.
///
/// Versions are checked for every family before anything is scanned.
///
/// # Errors
///
/// Returns an error when `--families` matches no checkout or a family has
/// inconsistent versions that are not tolerated.
pub fn run_codeflowers_command(
    args: &CodeflowersArgs,
    global: &GlobalOptions,
    config: &Config,
) -> Result<()> {
    if args.skip {
        info!("Skipping codeflowers");
        return Ok(());
    }
    let options = config.scope_options();
    let context = load_scope(global, &options)?;
    let tree = context.tree();

    let families = args
        .families
        .as_deref()
        .map(ProjectFamily::from_comma_delimited)
        .unwrap_or_default();
    let checkouts = if families.is_empty() {
        context.resolve(&options)
    } else {
        checkouts_in_families(tree, &families)?
    };

    let tolerate: BTreeSet<ProjectFamily> = config
        .codeflowers
        .tolerate_version_inconsistencies
        .iter()
        .flat_map(|value| ProjectFamily::from_comma_delimited(value))
        .collect();

    let by_family = projects_by_family(tree, &checkouts);
    if by_family.is_empty() {
        warn!("No projects to scan, nothing to do");
        return Ok(());
    }

    let mut jobs = Vec::new();
    for (family, projects) in by_family {
        let Some(version) = family_version(&family, &projects, tolerate.contains(&family))? else {
            continue;
        };
        let Some(assets) = family.assets_path(Some(tree.root().root())) else {
            warn!(
                family = %family,
                "No assets checkout for family; set {} to write codeflowers",
                family.environment_variable_name()
            );
            continue;
        };
        jobs.push(FamilyJob {
            output_dir: data_dir(&assets, &version),
            family,
            projects,
        });
    }

    let mut scanner =
        ProjectsScanner::new(WordCount).with_threads(config.scan.effective_threads());
    if !config.codeflowers.source_glob.trim().is_empty() {
        scanner = scanner.with_source_glob(config.codeflowers.source_glob.clone());
    }

    for job in jobs {
        info!(
            family = %job.family,
            projects = job.projects.len(),
            "Write codeflowers into {}",
            job.output_dir.display()
        );
        let writer = CodeflowersWriter::new(
            job.family,
            job.output_dir,
            config.codeflowers.indent,
            options.pretend,
        );
        let summary = scanner.scan(job.projects, |pom, results| writer.write(pom, results));
        info!(
            scanned = summary.scanned,
            skipped = summary.skipped,
            failed = summary.failed,
            "Codeflowers done for {}",
            writer.output_dir().display()
        );
    }
    Ok(())
}
