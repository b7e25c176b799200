// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Merge command arguments.
//!
//! ```text
//! merge [--from B] [--into B] [--also-into B] [--families a,b]
//!       [--no-tag] [--delete-merged] [--push] [--require-clean]
//! ```

use clap::Args;

use super::scope::ScopeArgs;
use crate::config::ConfigLoader;
use crate::error::Result;

/// Arguments for the `merge` command.
#[derive(Debug, Clone, Default, Args)]
pub struct MergeArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Branch to merge; each checkout's current branch by default.
    #[arg(long, value_name = "BRANCH")]
    pub from: Option<String>,

    /// Branch to merge into (default: develop).
    #[arg(long, value_name = "BRANCH")]
    pub into: Option<String>,

    /// Branch to merge into first, before --into.
    #[arg(long = "also-into", value_name = "BRANCH")]
    pub also_into: Option<String>,

    /// Operate on the checkouts of these families instead (scope family only).
    #[arg(long, value_name = "FAMILIES")]
    pub families: Option<String>,

    /// Don't tag the merge with the merged branch's name.
    #[arg(long)]
    pub no_tag: bool,

    /// Delete the merged branch afterwards.
    #[arg(long)]
    pub delete_merged: bool,

    /// Push every branch that received a merge.
    #[arg(long)]
    pub push: bool,

    /// Fail before merging if any checkout has local modifications.
    #[arg(long)]
    pub require_clean: bool,
}

impl MergeArgs {
    /// Records `[scope]` and `[merge]` overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be recorded.
    pub fn apply(&self, loader: ConfigLoader) -> Result<ConfigLoader> {
        self.scope
            .apply(loader)?
            .set_if("merge.into", self.into.clone())?
            .set_if("merge.tag", self.no_tag.then_some(false))?
            .set_if("merge.delete_merged", self.delete_merged.then_some(true))?
            .set_if("merge.push", self.push.then_some(true))?
            .set_if("merge.require_clean", self.require_clean.then_some(true))
    }
}
