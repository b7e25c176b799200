// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Merge one branch into another across a set of checkouts.
//!
//! ```text
//! plan()      per checkout: from (explicit | current), into, also
//!             drop: missing from/into, from == into
//!    |
//!    v
//! run()       per plan, sequential, failures contained:
//!               [also]  materialize -> merge from -> push?
//!               into    materialize -> merge from
//!               tag?    tag_name(from), forced
//!               delete? delete from (fallback: into)
//!               push?   push | push -u origin
//!    |
//!    v
//! MergeReport { merged, skipped, failed }
//! ```

use std::collections::BTreeSet;

use bitflags::bitflags;
use bon::Builder;
use tracing::{debug, error, info, warn};

use crate::error::{CactusResult, ConfigError};
use crate::git::branch::validate_branch_name;
use crate::git::{Branch, Checkout};
use crate::project::{ProjectFamily, ProjectTree, Scope};

bitflags! {
    /// Optional steps of the merge workflow.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MergeFlags: u8 {
        /// Force-create a tag named after the merged branch
        const TAG = 0x01;
        /// Delete the merged branch afterwards
        const DELETE_MERGED = 0x02;
        /// Push every branch that received a merge
        const PUSH = 0x04;
        /// Log every step without touching any repository
        const PRETEND = 0x08;
    }
}

/// What to merge where.
#[derive(Debug, Clone, Builder)]
pub struct MergeRequest {
    /// Branch merged from; each checkout's current branch when unset.
    #[builder(setters(name = with_from))]
    from: Option<String>,
    #[builder(into, setters(name = with_into))]
    into: String,
    /// Secondary target merged before `into`.
    #[builder(setters(name = with_also_into))]
    also_into: Option<String>,
    #[builder(default, setters(name = with_flags))]
    flags: MergeFlags,
}

impl MergeRequest {
    #[must_use]
    pub fn from_branch(&self) -> Option<&str> {
        self.from.as_deref()
    }

    #[must_use]
    pub fn into_branch(&self) -> &str {
        &self.into
    }

    #[must_use]
    pub fn also_into_branch(&self) -> Option<&str> {
        self.also_into.as_deref()
    }

    #[must_use]
    pub const fn flags(&self) -> MergeFlags {
        self.flags
    }

    const fn pretend(&self) -> bool {
        self.flags.contains(MergeFlags::PRETEND)
    }

    /// Checks every branch name against git's ref-name rules.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first invalid name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(from) = &self.from {
            validate_branch_name("from", from)?;
        }
        validate_branch_name("into", &self.into)?;
        if let Some(also) = &self.also_into {
            validate_branch_name("also-into", also)?;
        }
        Ok(())
    }
}

/// A target branch and whether `origin` already carries it.
#[derive(Debug, Clone)]
pub struct MergeTarget {
    branch: Branch,
    on_remote: bool,
}

impl MergeTarget {
    #[must_use]
    pub fn name(&self) -> &str {
        self.branch.name()
    }

    /// Whether the branch has to be created locally from its remote.
    #[must_use]
    pub const fn needs_local_branch(&self) -> bool {
        self.branch.is_remote()
    }
}

/// Resolved branches for one checkout.
#[derive(Debug, Clone)]
pub struct MergePlan {
    checkout: Checkout,
    from: Branch,
    into: MergeTarget,
    also: Option<MergeTarget>,
}

impl MergePlan {
    #[must_use]
    pub const fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    #[must_use]
    pub const fn from_branch(&self) -> &Branch {
        &self.from
    }

    #[must_use]
    pub const fn target(&self) -> &MergeTarget {
        &self.into
    }

    #[must_use]
    pub const fn secondary_target(&self) -> Option<&MergeTarget> {
        self.also.as_ref()
    }
}

/// Outcome of a merge run.
#[derive(Debug, Default)]
pub struct MergeReport {
    pub merged: Vec<Checkout>,
    /// Checkouts dropped during planning, with the reason.
    pub skipped: Vec<(Checkout, String)>,
    pub failed: Vec<(Checkout, String)>,
}

impl MergeReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Tag created for a merged branch: the part after the last `/`.
///
/// `feature/login` becomes `login`; names with a leading or trailing `/`
/// are used unchanged.
#[must_use]
pub fn tag_name(branch: &str) -> &str {
    match branch.rfind('/') {
        Some(ix) if ix > 0 && ix < branch.len() - 1 => &branch[ix + 1..],
        _ => branch,
    }
}

/// Replaces the scope's checkouts with those of `families`.
///
/// Only scope `family` accepts families. A set equal to the project's own
/// family leaves `checkouts` as they are. The root is appended when
/// `include_root` is set.
///
/// # Errors
///
/// Returns `ConfigError::ConflictingOptions` when families are combined
/// with any other scope.
pub fn apply_families(
    tree: &ProjectTree,
    scope: Scope,
    include_root: bool,
    own_family: &ProjectFamily,
    families: &BTreeSet<ProjectFamily>,
    checkouts: Vec<Checkout>,
) -> Result<Vec<Checkout>, ConfigError> {
    if families.is_empty() {
        return Ok(checkouts);
    }
    if scope != Scope::Family {
        return Err(ConfigError::ConflictingOptions {
            message: format!("families can only be used with scope 'family', not '{scope}'"),
        });
    }
    if families.len() == 1 && families.contains(own_family) {
        return Ok(checkouts);
    }

    let mut result: Vec<Checkout> = Vec::new();
    for family in families {
        for checkout in tree.checkouts_in_family(family) {
            if !result.contains(&checkout) {
                result.push(checkout);
            }
        }
    }
    if include_root && !result.contains(tree.root()) {
        result.push(tree.root().clone());
    }
    Ok(result)
}

/// Runs a [`MergeRequest`] against checkouts of one tree.
pub struct MergeRunner<'a> {
    tree: &'a ProjectTree,
    request: MergeRequest,
}

impl<'a> MergeRunner<'a> {
    #[must_use]
    pub const fn new(tree: &'a ProjectTree, request: MergeRequest) -> Self {
        Self { tree, request }
    }

    #[must_use]
    pub const fn request(&self) -> &MergeRequest {
        &self.request
    }

    /// Resolves branches per checkout, dropping those with nothing to do.
    pub fn plan(&self, checkouts: &[Checkout], report: &mut MergeReport) -> Vec<MergePlan> {
        let mut plans = Vec::new();
        for checkout in checkouts {
            match self.plan_checkout(checkout) {
                Ok(plan) => plans.push(plan),
                Err(reason) => {
                    debug!(checkout = %checkout, reason = %reason, "skipping checkout");
                    report.skipped.push((checkout.clone(), reason));
                }
            }
        }
        plans
    }

    fn plan_checkout(&self, checkout: &Checkout) -> Result<MergePlan, String> {
        let branches = self
            .tree
            .branches(checkout)
            .map_err(|e| format!("cannot list branches: {e}"))?;

        let from = match self.request.from_branch() {
            Some(name) => branches
                .find(name, true)
                .ok_or_else(|| format!("no local branch '{name}'"))?,
            None => branches
                .current_branch()
                .ok_or_else(|| "detached HEAD".to_string())?,
        };
        let into_name = self.request.into_branch();
        let into = branches
            .find_local_or_remote(into_name)
            .ok_or_else(|| format!("no branch '{into_name}'"))?;
        if from.name() == into.name() {
            return Err(format!("'{}' would be merged into itself", from.name()));
        }
        let target = |branch: &Branch| MergeTarget {
            on_remote: branches.find(branch.name(), false).is_some(),
            branch: branch.clone(),
        };
        let also = self
            .request
            .also_into_branch()
            .and_then(|name| branches.find_local_or_remote(name))
            .filter(|also| also.name() != from.name() && also.name() != into.name())
            .map(target);

        Ok(MergePlan {
            checkout: checkout.clone(),
            from: from.clone(),
            into: target(into),
            also,
        })
    }

    /// Plans and executes the merge, one checkout at a time.
    ///
    /// A failing checkout is recorded and the next one is attempted.
    pub fn run(&self, checkouts: &[Checkout]) -> MergeReport {
        let mut report = MergeReport::default();
        let plans = self.plan(checkouts, &mut report);
        if plans.is_empty() {
            warn!("No checkouts found to merge");
            return report;
        }
        info!("Have {} checkouts to merge", plans.len());
        if self.request.pretend() {
            debug!("pretend mode: no repository will be modified");
        }

        for plan in plans {
            match self.execute(&plan) {
                Ok(()) => report.merged.push(plan.checkout),
                Err(e) => {
                    error!(checkout = %plan.checkout, error = %e, "merge failed");
                    report.failed.push((plan.checkout, e.to_string()));
                }
            }
        }

        self.tree.invalidate_cache();
        report
    }

    fn execute(&self, plan: &MergePlan) -> CactusResult<()> {
        let checkout = &plan.checkout;
        let from = plan.from.name();
        let flags = self.request.flags();

        // secondary target first, so the checkout ends up on the primary one
        if let Some(also) = &plan.also {
            info!("First merge {from} into {} in {checkout}", also.name());
            self.materialize(checkout, also)?;
            self.mutate(|| checkout.merge(from))?;
            if flags.contains(MergeFlags::PUSH) {
                self.push(checkout, also)?;
            }
        }

        info!("Merge {from} into {} in {checkout}", plan.into.name());
        self.materialize(checkout, &plan.into)?;
        self.mutate(|| checkout.merge(from))?;

        if flags.contains(MergeFlags::TAG) {
            let tag = tag_name(from);
            info!("Tag {checkout} with {tag}");
            self.mutate(|| checkout.tag(tag, true))?;
        }
        if flags.contains(MergeFlags::DELETE_MERGED) {
            info!("Delete branch {from} in {checkout}");
            self.mutate(|| checkout.delete_branch(from, plan.into.name(), false))?;
        }
        if flags.contains(MergeFlags::PUSH) {
            self.push(checkout, &plan.into)?;
        }
        Ok(())
    }

    fn materialize(&self, checkout: &Checkout, target: &MergeTarget) -> CactusResult<()> {
        if target.needs_local_branch() {
            let tracking = target.branch.tracking_name();
            info!("Branch {tracking} does not exist locally in {checkout}, creating it");
            self.mutate(|| checkout.create_and_switch_to_branch(target.name(), Some(tracking.as_str())))
        } else {
            self.mutate(|| checkout.switch_to_branch(target.name()))
        }
    }

    fn push(&self, checkout: &Checkout, target: &MergeTarget) -> CactusResult<()> {
        info!("Push {} in {checkout}", target.name());
        if target.on_remote {
            self.mutate(|| checkout.push())
        } else {
            self.mutate(|| checkout.push_creating_branch())
        }
    }

    fn mutate(&self, op: impl FnOnce() -> CactusResult<()>) -> CactusResult<()> {
        if self.request.pretend() {
            return Ok(());
        }
        op()
    }
}
