// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the per-project commands.
//!
//! ```text
//! docs             [--output-folder DIR] [--commit-changes] [--skip]
//! codeflowers      [scope] [--families a,b] [--tolerate-version-inconsistencies a,b]
//!                  [--indent] [--threads N] [--skip]
//! filter-families  [--family F] [--families a,b] --properties p,q
//! metadata         [--output DIR]
//! ```

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Args;

use super::scope::ScopeArgs;
use crate::config::ConfigLoader;
use crate::error::Result;

/// Arguments for the `docs` command.
#[derive(Debug, Clone, Default, Args)]
pub struct DocsArgs {
    /// Where generated documentation goes; derived from the family otherwise.
    #[arg(long, value_name = "DIR")]
    pub output_folder: Option<PathBuf>,

    /// Regenerate README files.
    #[arg(long, value_name = "BOOL")]
    pub update_readme: Option<bool>,

    /// Overwrite existing documentation resources.
    #[arg(long, value_name = "BOOL")]
    pub overwrite_resources: Option<bool>,

    /// Commit the checkouts the generator modified.
    #[arg(long)]
    pub commit_changes: bool,

    /// Do nothing.
    #[arg(long)]
    pub skip: bool,
}

impl DocsArgs {
    /// Records `[docs]` overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be recorded.
    pub fn apply(&self, loader: ConfigLoader) -> Result<ConfigLoader> {
        loader
            .set_if("docs.update_readme", self.update_readme)?
            .set_if("docs.overwrite_resources", self.overwrite_resources)?
            .set_if("docs.commit_changes", self.commit_changes.then_some(true))
    }
}

/// Arguments for the `codeflowers` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CodeflowersArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Operate on the checkouts of these families instead.
    #[arg(long, value_name = "FAMILIES")]
    pub families: Option<String>,

    /// Families allowed to mix versions; the most common one is used.
    #[arg(long, value_name = "FAMILIES")]
    pub tolerate_version_inconsistencies: Option<String>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub indent: bool,

    /// Number of scanner threads.
    #[arg(long, value_name = "N")]
    pub threads: Option<NonZeroUsize>,

    /// Do nothing.
    #[arg(long)]
    pub skip: bool,
}

impl CodeflowersArgs {
    /// Records `[scope]`, `[codeflowers]` and `[scan]` overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be recorded.
    pub fn apply(&self, loader: ConfigLoader) -> Result<ConfigLoader> {
        let tolerate = self.tolerate_version_inconsistencies.as_deref().map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
                .collect::<Vec<_>>()
        });
        self.scope
            .apply(loader)?
            .set_if("codeflowers.indent", self.indent.then_some(true))?
            .set_if("codeflowers.tolerate_version_inconsistencies", tolerate)?
            .set_if(
                "scan.threads",
                self.threads.map(|n| u64::try_from(n.get()).unwrap_or(u64::MAX)),
            )
    }
}

/// Arguments for the `filter-families` command.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterFamiliesArgs {
    /// Family to keep when --families is empty.
    #[arg(long, value_name = "NAME")]
    pub family: Option<String>,

    /// Families to keep, comma-delimited.
    #[arg(long, value_name = "FAMILIES")]
    pub families: Option<String>,

    /// Properties to set on every other project, comma-delimited.
    #[arg(long, value_name = "PROPERTIES")]
    pub properties: Option<String>,
}

/// Arguments for the `metadata` command.
#[derive(Debug, Clone, Default, Args)]
pub struct MetadataArgs {
    /// Output directory (default: <project>/target/classes).
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}
