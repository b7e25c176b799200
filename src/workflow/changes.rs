// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Detect and commit checkouts dirtied by an external action.
//!
//! ```text
//! before = dirty(root ∪ non-maven ∪ all)
//! action().await            (exactly once; error propagates)
//! after  = dirty(root ∪ non-maven ∪ all)
//! changed = after \ before
//!
//! commit: deepest child first ... root last (if dirty afterwards)
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, error, info};

use crate::error::{CactusResult, Result};
use crate::git::Checkout;
use crate::project::{Coordinates, ProjectTree};

/// Every checkout of `tree` that currently has local modifications.
///
/// Drops cached state first. The root, the non-Maven checkouts and the
/// checkouts with projects are queried separately and unioned.
///
/// # Errors
///
/// Returns a `GitError` if a status query fails.
pub fn dirty_checkouts(tree: &ProjectTree) -> CactusResult<BTreeSet<Checkout>> {
    tree.invalidate_cache();
    let mut dirty = BTreeSet::new();
    let sources = std::iter::once(tree.root().clone())
        .chain(tree.non_maven_checkouts())
        .chain(tree.all_checkouts());
    for checkout in sources {
        if checkout.is_dirty()? {
            dirty.insert(checkout);
        }
    }
    Ok(dirty)
}

/// Runs `action` and returns its value with the checkouts it newly dirtied.
///
/// Checkouts already dirty beforehand are never reported, even if the
/// action touched them again.
///
/// # Errors
///
/// Returns the action's error, or a `GitError` from a status query.
pub async fn detect_incidental_changes<T, F, Fut>(
    tree: &ProjectTree,
    action: F,
) -> Result<(T, BTreeSet<Checkout>)>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let before = dirty_checkouts(tree)?;
    debug!(count = before.len(), "checkouts dirty before action");

    let value = action().await?;

    let after = dirty_checkouts(tree)?;
    let changed: BTreeSet<Checkout> = after.difference(&before).cloned().collect();
    debug!(count = changed.len(), "checkouts modified by action");
    Ok((value, changed))
}

/// Message for a generated commit.
#[derive(Debug, Clone)]
pub struct GeneratedCommitMessage {
    coordinates: Coordinates,
    user: String,
    home: String,
    host: String,
    runtime: String,
    when: DateTime<Utc>,
    checkouts: Vec<(String, PathBuf)>,
}

impl GeneratedCommitMessage {
    /// Message for `checkouts`, stamped with the invoking user and host.
    #[must_use]
    pub fn new(coordinates: Coordinates, checkouts: &BTreeSet<Checkout>) -> Self {
        Self {
            coordinates,
            user: std::env::var("USER")
                .or_else(|_| std::env::var("USERNAME"))
                .unwrap_or_else(|_| "unknown".to_string()),
            home: dirs::home_dir().map_or_else(|| "unknown".to_string(), |p| p.display().to_string()),
            host: host_name(),
            runtime: format!("cactus {}", env!("CARGO_PKG_VERSION")),
            when: Utc::now(),
            checkouts: checkouts
                .iter()
                .map(|c| (c.name().to_string(), c.root().to_path_buf()))
                .collect(),
        }
    }

    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    #[must_use]
    pub fn with_home(mut self, home: impl Into<String>) -> Self {
        self.home = home.into();
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    #[must_use]
    pub const fn with_when(mut self, when: DateTime<Utc>) -> Self {
        self.when = when;
        self
    }
}

impl fmt::Display for GeneratedCommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generated commit {}", self.coordinates)?;
        writeln!(f)?;
        writeln!(f, "User:\t{}", self.user)?;
        writeln!(f, "Home:\t{}", self.home)?;
        writeln!(f, "Host:\t{}", self.host)?;
        writeln!(f, "Runtime:\t{}", self.runtime)?;
        writeln!(
            f,
            "When:\t{}",
            self.when.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;
        writeln!(f)?;
        writeln!(f, "Modified checkouts:")?;
        for (name, path) in &self.checkouts {
            write!(f, "\n  * {name} ({})", path.display())?;
        }
        Ok(())
    }
}

fn host_name() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .or_else(|| {
            std::fs::read_to_string("/etc/hostname")
                .ok()
                .map(|s| s.trim().to_string())
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Outcome of [`commit_incidental_changes`].
#[derive(Debug, Default)]
pub struct CommitReport {
    pub committed: Vec<Checkout>,
    pub failed: Vec<(Checkout, String)>,
}

/// Commits every checkout in `changed`, deepest first, then the root.
///
/// The root is committed last, and only if it is dirty once the children
/// are done, which picks up their new submodule pointers. A checkout that
/// fails to stage or commit is logged and the rest continue.
pub fn commit_incidental_changes(
    tree: &ProjectTree,
    changed: &BTreeSet<Checkout>,
    message: &str,
    pretend: bool,
) -> CommitReport {
    let mut report = CommitReport::default();
    let mut children: Vec<&Checkout> = changed
        .iter()
        .filter(|c| !c.is_submodule_root())
        .collect();
    children.sort_by(|a, b| b.depth().cmp(&a.depth()).then_with(|| a.cmp(b)));

    for checkout in children {
        commit_one(checkout, message, pretend, &mut report);
    }

    tree.invalidate_cache();
    let root = tree.root();
    let root_dirty = changed.contains(root) || root.is_dirty().unwrap_or_else(|e| {
        error!(checkout = %root, error = %e, "cannot query root status");
        false
    });
    if root_dirty {
        commit_one(root, message, pretend, &mut report);
    }
    tree.invalidate_cache();
    report
}

fn commit_one(checkout: &Checkout, message: &str, pretend: bool, report: &mut CommitReport) {
    info!("Commit {checkout}");
    if pretend {
        report.committed.push(checkout.clone());
        return;
    }
    match checkout.add_all().and_then(|()| checkout.commit(message)) {
        Ok(()) => report.committed.push(checkout.clone()),
        Err(e) => {
            error!(checkout = %checkout, error = %e, "commit failed");
            report.failed.push((checkout.clone(), e.to_string()));
        }
    }
}
