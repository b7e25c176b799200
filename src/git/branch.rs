// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Branch model and ref-name validation.
//!
//! ```text
//! refs/heads/develop          -> Branch { name: develop, remote: None }
//! refs/remotes/origin/develop -> Branch { name: develop, remote: origin }
//! refs/remotes/origin/HEAD    -> skipped
//! ```

use std::fmt;

use crate::error::ConfigError;

/// Remote used when a branch is pushed for the first time.
pub const DEFAULT_REMOTE: &str = "origin";

/// A local or remote-tracking branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Branch {
    name: String,
    remote: Option<String>,
}

impl Branch {
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            remote: None,
        }
    }

    pub fn remote(remote: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            remote: Some(remote.into()),
        }
    }

    /// Parses a full ref name as printed by `git for-each-ref --format=%(refname)`.
    ///
    /// Returns `None` for symbolic `HEAD` refs and anything outside
    /// `refs/heads` or `refs/remotes`.
    #[must_use]
    pub fn from_ref(refname: &str) -> Option<Self> {
        if let Some(name) = refname.strip_prefix("refs/heads/") {
            return (!name.is_empty()).then(|| Self::local(name));
        }
        let rest = refname.strip_prefix("refs/remotes/")?;
        let (remote, name) = rest.split_once('/')?;
        if name.is_empty() || name == "HEAD" {
            return None;
        }
        Some(Self::remote(remote, name))
    }

    /// Branch name without any remote prefix.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn remote_name(&self) -> Option<&str> {
        self.remote.as_deref()
    }

    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Name usable as a start point: `origin/develop` for remote branches,
    /// the bare name for local ones.
    #[must_use]
    pub fn tracking_name(&self) -> String {
        match &self.remote {
            Some(remote) => format!("{remote}/{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tracking_name())
    }
}

/// Snapshot of a checkout's branches.
#[derive(Debug, Clone, Default)]
pub struct Branches {
    current: Option<Branch>,
    branches: Vec<Branch>,
}

impl Branches {
    /// Builds a snapshot from the current branch name and every known branch.
    #[must_use]
    pub fn new(current: Option<String>, mut branches: Vec<Branch>) -> Self {
        branches.sort();
        branches.dedup();
        Self {
            current: current.map(Branch::local),
            branches,
        }
    }

    /// Current local branch, `None` when HEAD is detached.
    #[must_use]
    pub const fn current_branch(&self) -> Option<&Branch> {
        self.current.as_ref()
    }

    /// Looks up `name` among local branches (`local == true`) or
    /// remote-tracking branches (`local == false`).
    ///
    /// Remote lookups prefer [`DEFAULT_REMOTE`] when several remotes carry
    /// the branch.
    #[must_use]
    pub fn find(&self, name: &str, local: bool) -> Option<&Branch> {
        if local {
            return self
                .branches
                .iter()
                .find(|b| !b.is_remote() && b.name == name);
        }
        let mut candidates = self.branches.iter().filter(|b| b.is_remote() && b.name == name);
        let first = candidates.next()?;
        if first.remote_name() == Some(DEFAULT_REMOTE) {
            return Some(first);
        }
        candidates
            .find(|b| b.remote_name() == Some(DEFAULT_REMOTE))
            .or(Some(first))
    }

    /// Local branch if present, otherwise a remote-tracking one.
    #[must_use]
    pub fn find_local_or_remote(&self, name: &str) -> Option<&Branch> {
        self.find(name, true).or_else(|| self.find(name, false))
    }

    pub fn local_branches(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter().filter(|b| !b.is_remote())
    }

    pub fn remote_branches(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter().filter(|b| b.is_remote())
    }
}

/// Rejects names git would refuse as a branch (`git check-ref-format --branch`).
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` naming the offending rule.
pub fn validate_branch_name(option: &str, name: &str) -> Result<(), ConfigError> {
    let problem = if name.is_empty() {
        Some("branch name is empty")
    } else if name.starts_with('-') {
        Some("branch name may not start with '-'")
    } else if name.starts_with('/') || name.ends_with('/') || name.contains("//") {
        Some("branch name has an empty path component")
    } else if name.ends_with('.') || name.ends_with(".lock") {
        Some("branch name may not end with '.' or '.lock'")
    } else if name.contains("..") || name.contains("@{") || name == "@" {
        Some("branch name contains '..' or '@{'")
    } else if name.split('/').any(|part| part.starts_with('.')) {
        Some("a path component may not start with '.'")
    } else if name
        .chars()
        .any(|c| c.is_control() || c.is_whitespace() || "~^:?*[\\".contains(c))
    {
        Some("branch name contains a forbidden character")
    } else {
        None
    };

    problem.map_or(Ok(()), |message| {
        Err(ConfigError::InvalidValue {
            section: "merge".to_string(),
            key: option.to_string(),
            message: format!("'{name}': {message}"),
        })
    })
}
