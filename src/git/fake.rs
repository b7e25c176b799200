// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory git backend for unit tests.
//!
//! Each repository path owns a [`FakeRepo`]. Mutations update it and are
//! recorded as `"<op> <args>"` strings so tests can assert on exactly which
//! commands would have reached git.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::backend::{GitMutation, GitQuery};
use super::branch::Branch;
use crate::error::{CactusResult, GitError};

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeRepo {
    pub(crate) dirty: bool,
    pub(crate) current: Option<String>,
    pub(crate) local: BTreeSet<String>,
    pub(crate) remote: BTreeSet<String>,
    pub(crate) tags: BTreeSet<String>,
    /// Operation names (`"merge"`, `"commit"`, ...) that fail in this repo.
    pub(crate) failing: BTreeSet<&'static str>,
}

impl FakeRepo {
    pub(crate) fn on_branch(branch: &str) -> Self {
        Self {
            current: Some(branch.to_string()),
            local: BTreeSet::from([branch.to_string()]),
            ..Self::default()
        }
    }

    pub(crate) fn with_local(mut self, branch: &str) -> Self {
        self.local.insert(branch.to_string());
        self
    }

    pub(crate) fn with_remote(mut self, branch: &str) -> Self {
        self.remote.insert(branch.to_string());
        self
    }

    pub(crate) const fn dirty(mut self) -> Self {
        self.dirty = true;
        self
    }

    pub(crate) fn failing_on(mut self, op: &'static str) -> Self {
        self.failing.insert(op);
        self
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeGit {
    repos: Mutex<BTreeMap<PathBuf, FakeRepo>>,
    calls: Mutex<Vec<(PathBuf, String)>>,
    queries: Mutex<usize>,
}

impl FakeGit {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&self, root: &Path, repo: FakeRepo) {
        self.repos
            .lock()
            .expect("fake git poisoned")
            .insert(root.to_path_buf(), repo);
    }

    pub(crate) fn repo(&self, root: &Path) -> FakeRepo {
        self.repos
            .lock()
            .expect("fake git poisoned")
            .get(root)
            .cloned()
            .unwrap_or_default()
    }

    /// Marks a repository dirty behind the cache's back, as an external tool would.
    pub(crate) fn touch(&self, root: &Path) {
        self.repos
            .lock()
            .expect("fake git poisoned")
            .entry(root.to_path_buf())
            .or_default()
            .dirty = true;
    }

    /// Every mutation issued so far, in order.
    pub(crate) fn calls(&self) -> Vec<(PathBuf, String)> {
        self.calls.lock().expect("fake git poisoned").clone()
    }

    /// Mutations issued against one repository.
    pub(crate) fn calls_for(&self, root: &Path) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(path, _)| path == root)
            .map(|(_, call)| call)
            .collect()
    }

    /// Number of `is_dirty` queries that reached the backend.
    pub(crate) fn dirty_queries(&self) -> usize {
        *self.queries.lock().expect("fake git poisoned")
    }

    fn mutate(
        &self,
        root: &Path,
        op: &'static str,
        call: String,
        apply: impl FnOnce(&mut FakeRepo) -> Result<(), String>,
    ) -> CactusResult<()> {
        self.calls
            .lock()
            .expect("fake git poisoned")
            .push((root.to_path_buf(), call.clone()));
        let mut repos = self.repos.lock().expect("fake git poisoned");
        let repo = repos.entry(root.to_path_buf()).or_default();
        if repo.failing.contains(op) {
            return Err(GitError::CommandFailed {
                command: call,
                message: "simulated failure".to_string(),
            }
            .into());
        }
        apply(repo).map_err(|message| GitError::CommandFailed { command: call, message }.into())
    }
}

impl GitQuery for FakeGit {
    fn is_dirty(&self, repo: &Path) -> CactusResult<bool> {
        *self.queries.lock().expect("fake git poisoned") += 1;
        Ok(self.repo(repo).dirty)
    }

    fn current_branch(&self, repo: &Path) -> CactusResult<Option<String>> {
        Ok(self.repo(repo).current)
    }

    fn list_branches(&self, repo: &Path) -> CactusResult<Vec<Branch>> {
        let state = self.repo(repo);
        Ok(state
            .local
            .iter()
            .map(Branch::local)
            .chain(state.remote.iter().map(|b| Branch::remote("origin", b.as_str())))
            .collect())
    }
}

impl GitMutation for FakeGit {
    fn switch_branch(&self, repo: &Path, branch: &str) -> CactusResult<()> {
        self.mutate(repo, "switch", format!("switch {branch}"), |r| {
            if !r.local.contains(branch) {
                return Err(format!("no local branch {branch}"));
            }
            r.current = Some(branch.to_string());
            Ok(())
        })
    }

    fn create_branch(&self, repo: &Path, branch: &str, start: Option<&str>) -> CactusResult<()> {
        let call = match start {
            Some(start) => format!("create {branch} from {start}"),
            None => format!("create {branch}"),
        };
        self.mutate(repo, "create", call, |r| {
            if !r.local.insert(branch.to_string()) {
                return Err(format!("branch {branch} exists"));
            }
            r.current = Some(branch.to_string());
            Ok(())
        })
    }

    fn merge(&self, repo: &Path, branch: &str) -> CactusResult<()> {
        self.mutate(repo, "merge", format!("merge {branch}"), |_| Ok(()))
    }

    fn tag(&self, repo: &Path, name: &str, force: bool) -> CactusResult<()> {
        self.mutate(repo, "tag", format!("tag {name} force={force}"), |r| {
            if !r.tags.insert(name.to_string()) && !force {
                return Err(format!("tag {name} exists"));
            }
            Ok(())
        })
    }

    fn delete_branch(&self, repo: &Path, branch: &str, force: bool) -> CactusResult<()> {
        self.mutate(repo, "delete", format!("delete {branch} force={force}"), |r| {
            if r.current.as_deref() == Some(branch) {
                return Err(format!("cannot delete checked out branch {branch}"));
            }
            r.local.remove(branch);
            Ok(())
        })
    }

    fn push(&self, repo: &Path) -> CactusResult<()> {
        self.mutate(repo, "push", "push".to_string(), |r| {
            if let Some(current) = r.current.clone() {
                r.remote.insert(current);
            }
            Ok(())
        })
    }

    fn push_new_branch(&self, repo: &Path, remote: &str, branch: &str) -> CactusResult<()> {
        self.mutate(repo, "push", format!("push -u {remote} {branch}"), |r| {
            r.remote.insert(branch.to_string());
            Ok(())
        })
    }

    fn add_all(&self, repo: &Path) -> CactusResult<()> {
        self.mutate(repo, "add", "add -A".to_string(), |_| Ok(()))
    }

    fn commit(&self, repo: &Path, message: &str) -> CactusResult<()> {
        let subject = message.lines().next().unwrap_or_default().to_string();
        self.mutate(repo, "commit", format!("commit {subject}"), |r| {
            r.dirty = false;
            Ok(())
        })
    }
}
