// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Multi-checkout git workflows.
//!
//! ```text
//! ensure_clean(checkouts)          precondition, lists every dirty one
//!
//! merge                            MergeRunner: plan -> run -> MergeReport
//!   from/into/also, TAG | DELETE_MERGED | PUSH | PRETEND
//!
//! changes                          detect_incidental_changes(tree, action)
//!                                  commit_incidental_changes (children, root)
//!
//! families                         skip_properties for projects outside a set
//! ```

pub mod changes;
pub mod families;
pub mod merge;


pub use changes::{
    CommitReport, GeneratedCommitMessage, commit_incidental_changes, detect_incidental_changes,
    dirty_checkouts,
};
pub use families::{requested_families, skip_properties, split_properties};
pub use merge::{MergeFlags, MergePlan, MergeReport, MergeRequest, MergeRunner, apply_families, tag_name};

use crate::error::{CactusResult, GitError};
use crate::git::Checkout;

/// Fails when any of `checkouts` has local modifications.
///
/// # Errors
///
/// Returns `GitError::UncommittedChanges` naming every dirty checkout, or
/// the first status query error.
pub fn ensure_clean(checkouts: &[Checkout]) -> CactusResult<()> {
    let mut dirty = Vec::new();
    for checkout in checkouts {
        if checkout.is_dirty()? {
            dirty.push(checkout.name().to_string());
        }
    }
    if dirty.is_empty() {
        Ok(())
    } else {
        Err(GitError::UncommittedChanges { checkouts: dirty }.into())
    }
}
