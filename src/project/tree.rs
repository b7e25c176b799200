// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Index of every checkout and Maven project under a submodule root.
//!
//! ```text
//! ProjectTree::scan(root)
//!   parallel_walk (skip .git/target/node_modules, hidden)
//!     dirs with .git entry  -> checkouts
//!     pom.xml files         -> Pom, assigned to nearest checkout
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Context;
use tracing::{debug, warn};

use super::family::ProjectFamily;
use super::pom::Pom;
use crate::error::{CactusResult, GitError, Result};
use crate::git::checkout::{Checkout, find_submodule_root, require_checkout_root};
use crate::git::{Branches, GitBackend};
use crate::utility::fs::walk::{WalkOptions, parallel_walk};

const POM_FILE: &str = "pom.xml";

/// Checkouts and projects of one workspace.
pub struct ProjectTree {
    root: Checkout,
    projects: BTreeMap<Checkout, Vec<Pom>>,
    branches: Mutex<HashMap<PathBuf, Branches>>,
}

impl ProjectTree {
    /// Builds the tree for the workspace enclosing `project_dir`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NotACheckout` when `project_dir` is outside git, or
    /// a walk error.
    pub fn for_project_dir(project_dir: &Path, git: Arc<dyn GitBackend>) -> Result<Self> {
        let project_dir = std::fs::canonicalize(project_dir)
            .with_context(|| format!("no such directory: {}", project_dir.display()))?;
        require_checkout_root(&project_dir)?;
        let root = find_submodule_root(&project_dir).ok_or_else(|| GitError::NotACheckout {
            path: project_dir.display().to_string(),
        })?;
        Self::scan(&root, git)
    }

    /// Walks `root_dir`, treating it as the submodule root.
    ///
    /// Unparseable poms are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if `root_dir` does not exist.
    pub fn scan(root_dir: &Path, git: Arc<dyn GitBackend>) -> Result<Self> {
        let walk = parallel_walk(root_dir, &WalkOptions::for_workspace())
            .with_context(|| format!("failed to scan {}", root_dir.display()))?;
        if walk.error_count() > 0 {
            warn!(root = %root_dir.display(), errors = walk.error_count(), "unreadable entries skipped");
        }

        let root = Checkout::new_root(root_dir, git);
        let mut checkout_roots: BTreeSet<PathBuf> = walk
            .directories()
            .iter()
            .filter(|dir| dir.join(".git").exists())
            .cloned()
            .collect();
        checkout_roots.insert(root_dir.to_path_buf());

        let checkouts: BTreeMap<PathBuf, Checkout> = checkout_roots
            .into_iter()
            .map(|path| {
                let checkout = if path == root_dir {
                    root.clone()
                } else {
                    Checkout::new_nested(path.clone(), &root)
                };
                (path, checkout)
            })
            .collect();

        let mut projects: BTreeMap<Checkout, Vec<Pom>> = checkouts
            .values()
            .map(|checkout| (checkout.clone(), Vec::new()))
            .collect();

        for pom_path in walk
            .files()
            .iter()
            .filter(|file| file.file_name().is_some_and(|name| name == POM_FILE))
        {
            let pom = match Pom::from_file(pom_path) {
                Ok(pom) => pom,
                Err(e) => {
                    warn!(pom = %pom_path.display(), error = %e, "skipping unreadable pom");
                    continue;
                }
            };
            let owner = pom
                .project_dir()
                .ancestors()
                .find_map(|dir| checkouts.get(dir))
                .unwrap_or(&root);
            if let Some(list) = projects.get_mut(owner) {
                list.push(pom);
            }
        }
        for list in projects.values_mut() {
            list.sort();
        }

        debug!(
            root = %root_dir.display(),
            checkouts = projects.len(),
            projects = projects.values().map(Vec::len).sum::<usize>(),
            "project tree scanned"
        );

        Ok(Self {
            root,
            projects,
            branches: Mutex::new(HashMap::new()),
        })
    }

    /// The submodule root checkout.
    #[must_use]
    pub const fn root(&self) -> &Checkout {
        &self.root
    }

    /// Nearest checkout enclosing `dir`.
    #[must_use]
    pub fn checkout_containing(&self, dir: &Path) -> Option<Checkout> {
        dir.ancestors().find_map(|candidate| {
            self.projects
                .keys()
                .find(|checkout| checkout.root() == candidate)
                .cloned()
        })
    }

    /// Checkouts containing at least one project, in path order.
    #[must_use]
    pub fn all_checkouts(&self) -> Vec<Checkout> {
        self.projects
            .iter()
            .filter(|(_, poms)| !poms.is_empty())
            .map(|(checkout, _)| checkout.clone())
            .collect()
    }

    /// Checkouts other than the root that contain no project.
    #[must_use]
    pub fn non_maven_checkouts(&self) -> Vec<Checkout> {
        self.projects
            .iter()
            .filter(|(checkout, poms)| poms.is_empty() && !checkout.is_submodule_root())
            .map(|(checkout, _)| checkout.clone())
            .collect()
    }

    #[must_use]
    pub fn projects_within(&self, checkout: &Checkout) -> &[Pom] {
        self.projects.get(checkout).map_or(&[], Vec::as_slice)
    }

    pub fn all_projects(&self) -> impl Iterator<Item = &Pom> {
        self.projects.values().flatten()
    }

    /// Project whose `pom.xml` sits directly in `dir`.
    #[must_use]
    pub fn project_in(&self, dir: &Path) -> Option<&Pom> {
        self.all_projects().find(|pom| pom.project_dir() == dir)
    }

    /// Checkouts holding a project of `family`.
    #[must_use]
    pub fn checkouts_in_family(&self, family: &ProjectFamily) -> Vec<Checkout> {
        self.checkouts_where(|pom| pom.family() == *family)
    }

    /// Checkouts holding a project of `family` or of a family whose parent is `family`.
    #[must_use]
    pub fn checkouts_in_family_or_child_family(&self, family: &ProjectFamily) -> Vec<Checkout> {
        self.checkouts_where(|pom| {
            pom.family() == *family
                || ProjectFamily::parent_of_group_id(pom.group_id()).as_ref() == Some(family)
        })
    }

    #[must_use]
    pub fn checkouts_with_group_id(&self, group_id: &str) -> Vec<Checkout> {
        self.checkouts_where(|pom| pom.group_id() == group_id)
    }

    fn checkouts_where(&self, predicate: impl Fn(&Pom) -> bool) -> Vec<Checkout> {
        self.projects
            .iter()
            .filter(|(_, poms)| poms.iter().any(&predicate))
            .map(|(checkout, _)| checkout.clone())
            .collect()
    }

    /// Branch snapshot for `checkout`, cached until [`Self::invalidate_cache`].
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the branches cannot be listed.
    pub fn branches(&self, checkout: &Checkout) -> CactusResult<Branches> {
        let mut cache = self.branches.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(branches) = cache.get(checkout.root()) {
            return Ok(branches.clone());
        }
        let branches = checkout.branches()?;
        cache.insert(checkout.root().to_path_buf(), branches.clone());
        Ok(branches)
    }

    /// Drops cached branch snapshots and every checkout's dirty flag.
    pub fn invalidate_cache(&self) {
        self.branches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        for checkout in self.projects.keys() {
            checkout.invalidate_cache();
        }
    }
}
