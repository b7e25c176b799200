// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! A git working tree rooted at one directory.
//!
//! ```text
//! workspace/            <- submodule root (outermost checkout)
//!   .git/
//!   kivakit/            <- checkout, submodule_root() == workspace
//!     .git              (file: submodule)
//!     kivakit-core/pom.xml
//! ```
//!
//! Checkouts are cheap handles (`Arc` inside). Identity, ordering and hashing
//! follow the root path. The dirty flag is cached until
//! [`Checkout::invalidate_cache`] or a mutation through the handle.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use super::backend::GitBackend;
use super::branch::{Branches, DEFAULT_REMOTE};
use crate::error::{CactusResult, GitError};

struct CheckoutInner {
    root: PathBuf,
    name: String,
    submodule_root: Option<Weak<Self>>,
    git: Arc<dyn GitBackend>,
    dirty: Mutex<Option<bool>>,
}

/// Handle to one git checkout.
#[derive(Clone)]
pub struct Checkout {
    inner: Arc<CheckoutInner>,
}

impl Checkout {
    /// Creates the outermost checkout of a tree; it is its own submodule root.
    pub fn new_root(root: impl Into<PathBuf>, git: Arc<dyn GitBackend>) -> Self {
        let root = root.into();
        let name = root
            .file_name()
            .map_or_else(|| root.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self::with_parts(root, name, None, git)
    }

    /// Creates a checkout nested under `submodule_root`, named by its relative path.
    pub fn new_nested(root: impl Into<PathBuf>, submodule_root: &Self) -> Self {
        let root = root.into();
        let name = root.strip_prefix(submodule_root.root()).map_or_else(
            |_| root.display().to_string(),
            |rel| rel.to_string_lossy().replace('\\', "/"),
        );
        Self::with_parts(
            root,
            name,
            Some(Arc::downgrade(&submodule_root.inner)),
            Arc::clone(&submodule_root.inner.git),
        )
    }

    fn with_parts(
        root: PathBuf,
        name: String,
        submodule_root: Option<Weak<CheckoutInner>>,
        git: Arc<dyn GitBackend>,
    ) -> Self {
        Self {
            inner: Arc::new(CheckoutInner {
                root,
                name,
                submodule_root,
                git,
                dirty: Mutex::new(None),
            }),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    /// Path relative to the submodule root, or the directory name for the root itself.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[must_use]
    pub fn is_submodule_root(&self) -> bool {
        self.inner.submodule_root.is_none()
    }

    /// The outermost checkout this one belongs to.
    ///
    /// `None` only when the owning tree has already been dropped.
    #[must_use]
    pub fn submodule_root(&self) -> Option<Self> {
        match &self.inner.submodule_root {
            None => Some(self.clone()),
            Some(weak) => weak.upgrade().map(|inner| Self { inner }),
        }
    }

    /// Number of path components in the root; deeper checkouts sort first
    /// when committing bottom-up.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.inner.root.components().count()
    }

    /// Whether the work tree carries local modifications. Cached.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the status query fails.
    pub fn is_dirty(&self) -> CactusResult<bool> {
        let mut cached = self
            .inner
            .dirty
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(dirty) = *cached {
            return Ok(dirty);
        }
        let dirty = self.inner.git.is_dirty(self.root())?;
        *cached = Some(dirty);
        Ok(dirty)
    }

    /// Forgets the cached dirty flag.
    pub fn invalidate_cache(&self) {
        *self
            .inner
            .dirty
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Fresh branch snapshot (uncached; see `ProjectTree::branches`).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if refs cannot be read.
    pub fn branches(&self) -> CactusResult<Branches> {
        self.inner.git.branches(self.root())
    }

    /// # Errors
    ///
    /// Returns a `GitError` if the branch does not exist locally.
    pub fn switch_to_branch(&self, branch: &str) -> CactusResult<()> {
        self.mutating(|git, root| git.switch_branch(root, branch))
    }

    /// Creates `branch` and switches to it, tracking `start_point` when given.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the branch exists or the start point is unknown.
    pub fn create_and_switch_to_branch(
        &self,
        branch: &str,
        start_point: Option<&str>,
    ) -> CactusResult<()> {
        self.mutating(|git, root| git.create_branch(root, branch, start_point))
    }

    /// # Errors
    ///
    /// Returns a `GitError` on conflicts or an unknown branch.
    pub fn merge(&self, branch: &str) -> CactusResult<()> {
        self.mutating(|git, root| git.merge(root, branch))
    }

    /// # Errors
    ///
    /// Returns a `GitError` if the tag exists and `force` is false.
    pub fn tag(&self, name: &str, force: bool) -> CactusResult<()> {
        self.mutating(|git, root| git.tag(root, name, force))
    }

    /// Deletes `branch`, first switching to `fallback` if `branch` is checked out.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the switch or the deletion fails.
    pub fn delete_branch(&self, branch: &str, fallback: &str, force: bool) -> CactusResult<()> {
        let current = self.inner.git.current_branch(self.root())?;
        if current.as_deref() == Some(branch) {
            self.switch_to_branch(fallback)?;
        }
        self.mutating(|git, root| git.delete_branch(root, branch, force))
    }

    /// # Errors
    ///
    /// Returns a `GitError` if the push is rejected.
    pub fn push(&self) -> CactusResult<()> {
        self.inner.git.push(self.root())
    }

    /// Pushes the current branch to [`DEFAULT_REMOTE`], creating it there.
    ///
    /// # Errors
    ///
    /// Returns `GitError::BranchNotFound` on a detached HEAD, or a push failure.
    pub fn push_creating_branch(&self) -> CactusResult<()> {
        let branch = self
            .inner
            .git
            .current_branch(self.root())?
            .ok_or_else(|| GitError::BranchNotFound {
                branch: "HEAD".to_string(),
            })?;
        self.inner
            .git
            .push_new_branch(self.root(), DEFAULT_REMOTE, &branch)
    }

    /// # Errors
    ///
    /// Returns a `GitError` if staging fails.
    pub fn add_all(&self) -> CactusResult<()> {
        self.mutating(|git, root| git.add_all(root))
    }

    /// # Errors
    ///
    /// Returns a `GitError` if there is nothing to commit or the commit fails.
    pub fn commit(&self, message: &str) -> CactusResult<()> {
        self.mutating(|git, root| git.commit(root, message))
    }

    fn mutating(
        &self,
        op: impl FnOnce(&dyn GitBackend, &Path) -> CactusResult<()>,
    ) -> CactusResult<()> {
        let result = op(self.inner.git.as_ref(), self.root());
        self.invalidate_cache();
        result
    }
}

impl fmt::Display for Checkout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for Checkout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checkout")
            .field("name", &self.inner.name)
            .field("root", &self.inner.root)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Checkout {
    fn eq(&self, other: &Self) -> bool {
        self.inner.root == other.inner.root
    }
}

impl Eq for Checkout {}

impl Hash for Checkout {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.root.hash(state);
    }
}

impl PartialOrd for Checkout {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Checkout {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.root.cmp(&other.inner.root)
    }
}

// --- Discovery ---

/// Nearest ancestor of `dir` (inclusive) holding a `.git` entry.
#[must_use]
pub fn find_checkout_root(dir: &Path) -> Option<PathBuf> {
    dir.ancestors()
        .find(|candidate| candidate.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Outermost checkout enclosing `dir` through submodule links.
///
/// The walk climbs from a checkout to the one enclosing it only while the
/// checkout is a submodule of it: its `.git` is a file, or the enclosing
/// checkout's `.gitmodules` lists its path. An independent clone that merely
/// sits inside another repository is its own root.
#[must_use]
pub fn find_submodule_root(dir: &Path) -> Option<PathBuf> {
    let mut outermost = find_checkout_root(dir)?;
    while let Some(parent) = outermost.parent()
        && let Some(enclosing) = find_checkout_root(parent)
        && is_submodule_of(&outermost, &enclosing)
    {
        outermost = enclosing;
    }
    Some(outermost)
}

fn is_submodule_of(checkout: &Path, enclosing: &Path) -> bool {
    if checkout.join(".git").is_file() {
        return true;
    }
    let Ok(relative) = checkout.strip_prefix(enclosing) else {
        return false;
    };
    let relative = relative.to_string_lossy().replace('\\', "/");
    std::fs::read_to_string(enclosing.join(".gitmodules"))
        .is_ok_and(|modules| submodule_paths(&modules).any(|path| path == relative))
}

/// `path = ...` values of a `.gitmodules` file.
fn submodule_paths(modules: &str) -> impl Iterator<Item = &str> {
    modules.lines().filter_map(|line| {
        let (key, value) = line.split_once('=')?;
        (key.trim() == "path").then(|| value.trim().trim_end_matches('/'))
    })
}

/// Fails with `GitError::NotACheckout` unless `dir` lies inside a checkout.
///
/// # Errors
///
/// Returns `GitError::NotACheckout` with the offending path.
pub fn require_checkout_root(dir: &Path) -> CactusResult<PathBuf> {
    find_checkout_root(dir).ok_or_else(|| {
        GitError::NotACheckout {
            path: dir.display().to_string(),
        }
        .into()
    })
}
