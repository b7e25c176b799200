// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scope arguments shared by `checkouts`, `merge` and `codeflowers`.

use clap::Args;

use crate::config::ConfigLoader;
use crate::error::Result;

/// Which checkouts to operate on.
#[derive(Debug, Clone, Default, Args)]
pub struct ScopeArgs {
    /// just-this, same-group-id, family, family-or-child-family or all.
    #[arg(short = 's', long, value_name = "SCOPE")]
    pub scope: Option<String>,

    /// Family to use instead of the one derived from the group id.
    #[arg(long, value_name = "NAME")]
    pub family: Option<String>,

    /// Also operate on the root checkout.
    #[arg(long, overrides_with = "no_include_root")]
    pub include_root: bool,

    /// Leave the root checkout alone.
    #[arg(long, overrides_with = "include_root")]
    pub no_include_root: bool,
}

impl ScopeArgs {
    /// `Some` only when one of the two flags was given.
    #[must_use]
    pub const fn include_root(&self) -> Option<bool> {
        if self.include_root {
            Some(true)
        } else if self.no_include_root {
            Some(false)
        } else {
            None
        }
    }

    /// Records `[scope]` overrides. An unknown scope name fails later, when
    /// the configuration is built.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be recorded.
    pub fn apply(&self, loader: ConfigLoader) -> Result<ConfigLoader> {
        loader
            .set_if("scope.scope", self.scope.clone())?
            .set_if("scope.family", self.family.clone())?
            .set_if("scope.include_root", self.include_root())
    }
}

/// Arguments for the `checkouts` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CheckoutsArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Fail if any of the checkouts has local modifications.
    #[arg(long)]
    pub require_clean: bool,
}
