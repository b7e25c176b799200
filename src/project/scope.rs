// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Which checkouts an operation touches.
//!
//! ```text
//! JUST_THIS               {own checkout}           (alias: same-repository)
//! SAME_GROUP_ID           projects with same groupId       (+ root)
//! FAMILY                  projects of the family           (+ root)
//! FAMILY_OR_CHILD_FAMILY  family or its child families     (+ root)
//! ALL                     every checkout with projects     (+ root)
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use super::family::ProjectFamily;
use super::pom::Pom;
use super::tree::ProjectTree;
use crate::error::{ConfigError, ProjectError, Result};
use crate::git::{Checkout, GitBackend};

/// Checkout selection rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// Only the checkout of the invoking project.
    JustThis,
    /// Checkouts containing projects with the invoking project's group id.
    SameGroupId,
    /// Checkouts containing projects of the active family.
    #[default]
    Family,
    /// Like `Family`, plus families whose parent is the active family.
    FamilyOrChildFamily,
    /// Every checkout that contains a project.
    All,
}

impl Scope {
    pub const ALL_SCOPES: [Self; 5] = [
        Self::JustThis,
        Self::SameGroupId,
        Self::Family,
        Self::FamilyOrChildFamily,
        Self::All,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JustThis => "just-this",
            Self::SameGroupId => "same-group-id",
            Self::Family => "family",
            Self::FamilyOrChildFamily => "family-or-child-family",
            Self::All => "all",
        }
    }

    /// Whether the active project family influences the result.
    #[must_use]
    pub const fn applies_family(self) -> bool {
        matches!(self, Self::Family | Self::FamilyOrChildFamily)
    }

    /// Resolves the checkouts for this scope.
    ///
    /// The submodule root is appended when `include_root` is set and it is
    /// not already present, except for `JustThis`, which always yields
    /// exactly the requesting checkout.
    #[must_use]
    pub fn match_checkouts(
        self,
        tree: &ProjectTree,
        requesting: &Checkout,
        include_root: bool,
        family: &ProjectFamily,
        group_id: &str,
    ) -> Vec<Checkout> {
        let mut checkouts = match self {
            Self::JustThis => return vec![requesting.clone()],
            Self::SameGroupId => tree.checkouts_with_group_id(group_id),
            Self::Family => tree.checkouts_in_family(family),
            Self::FamilyOrChildFamily => tree.checkouts_in_family_or_child_family(family),
            Self::All => tree.all_checkouts(),
        };
        if include_root && !checkouts.contains(tree.root()) {
            checkouts.push(tree.root().clone());
        }
        checkouts
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "just-this" | "same-repository" => Ok(Self::JustThis),
            "same-group-id" => Ok(Self::SameGroupId),
            "family" => Ok(Self::Family),
            "family-or-child-family" => Ok(Self::FamilyOrChildFamily),
            "all" => Ok(Self::All),
            _ => Err(ConfigError::InvalidValue {
                section: "scope".to_string(),
                key: "scope".to_string(),
                message: format!(
                    "unknown scope '{s}', expected one of: {}",
                    Self::ALL_SCOPES.map(Self::as_str).join(", ")
                ),
            }),
        }
    }
}

impl Serialize for Scope {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Scope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Scope parameters after CLI and config have been merged.
#[derive(Debug, Clone, Default)]
pub struct ScopeOptions {
    pub scope: Scope,
    pub include_root: bool,
    /// Explicit family, overriding the one derived from the group id.
    pub family: Option<String>,
    pub pretend: bool,
}

/// The invoking project, its checkout, and the tree around it.
pub struct ScopeContext {
    tree: ProjectTree,
    project: Pom,
    checkout: Checkout,
    family: ProjectFamily,
}

impl ScopeContext {
    /// Locates the project in `project_dir` and scans its workspace.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NotACheckout` outside git, or
    /// `ProjectError::NoProject` when `project_dir` has no `pom.xml`.
    pub fn load(
        project_dir: &Path,
        git: Arc<dyn GitBackend>,
        options: &ScopeOptions,
    ) -> Result<Self> {
        let tree = ProjectTree::for_project_dir(project_dir, git)?;
        let project_dir = std::fs::canonicalize(project_dir)?;
        let project = tree
            .project_in(&project_dir)
            .cloned()
            .ok_or_else(|| ProjectError::NoProject {
                path: project_dir.display().to_string(),
            })?;
        let checkout = tree
            .checkout_containing(&project_dir)
            .unwrap_or_else(|| tree.root().clone());

        let family = match options.family.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                if !options.scope.applies_family() {
                    warn!(
                        family = name,
                        scope = %options.scope,
                        "useless assignment of family: scope does not use families"
                    );
                }
                ProjectFamily::named(name)
            }
            _ => project.family(),
        };

        Ok(Self {
            tree,
            project,
            checkout,
            family,
        })
    }

    #[must_use]
    pub const fn tree(&self) -> &ProjectTree {
        &self.tree
    }

    #[must_use]
    pub const fn project(&self) -> &Pom {
        &self.project
    }

    /// Checkout containing the invoking project.
    #[must_use]
    pub const fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    #[must_use]
    pub const fn family(&self) -> &ProjectFamily {
        &self.family
    }

    /// Applies `options` to this context.
    #[must_use]
    pub fn resolve(&self, options: &ScopeOptions) -> Vec<Checkout> {
        let checkouts = options.scope.match_checkouts(
            &self.tree,
            &self.checkout,
            options.include_root,
            &self.family,
            self.project.group_id(),
        );
        debug!(scope = %options.scope, count = checkouts.len(), "operate on the following checkouts");
        for checkout in &checkouts {
            debug!("  * {checkout}");
        }
        checkouts
    }
}
