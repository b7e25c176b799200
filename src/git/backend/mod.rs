// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --+
//!                       +--> GitBackend --> GixBackend   (gix reads, git CLI writes)
//! GitMutation (write) --+                   ShellBackend (git CLI)
//!                                           FakeGit      (tests)
//! ```
//!
//! Every method takes the checkout root it acts on. Checkouts hold an
//! `Arc<dyn GitBackend>` so workflows never name a concrete backend.

use std::path::Path;
use std::process::Command;

use tracing::trace;

use super::branch::{Branch, Branches};
use crate::error::{CactusResult, GitError, GixError};

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
pub trait GitQuery {
    /// Whether the work tree has staged, unstaged or untracked changes,
    /// including moved submodule pointers.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the status query fails.
    fn is_dirty(&self, repo: &Path) -> CactusResult<bool>;

    /// Current branch name, `None` if HEAD is detached.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if HEAD cannot be read.
    fn current_branch(&self, repo: &Path) -> CactusResult<Option<String>>;

    /// Every local and remote-tracking branch.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if refs cannot be listed.
    fn list_branches(&self, repo: &Path) -> CactusResult<Vec<Branch>>;

    /// Current branch plus every known branch in one snapshot.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`Self::current_branch`] and [`Self::list_branches`].
    fn branches(&self, repo: &Path) -> CactusResult<Branches> {
        Ok(Branches::new(
            self.current_branch(repo)?,
            self.list_branches(repo)?,
        ))
    }
}

// --- Mutation Trait (Write operations) ---

/// Git mutation operations that modify repository state.
///
/// # Errors
///
/// Every method returns a `GitError` when git refuses the operation.
#[allow(clippy::missing_errors_doc)]
pub trait GitMutation {
    /// Switch the work tree to an existing local branch.
    fn switch_branch(&self, repo: &Path, branch: &str) -> CactusResult<()>;

    /// Create `branch` and switch to it, tracking `start_point` when given.
    fn create_branch(&self, repo: &Path, branch: &str, start_point: Option<&str>)
    -> CactusResult<()>;

    /// Merge `branch` into the current branch.
    fn merge(&self, repo: &Path, branch: &str) -> CactusResult<()>;

    /// Tag HEAD, replacing an existing tag when `force` is set.
    fn tag(&self, repo: &Path, name: &str, force: bool) -> CactusResult<()>;

    /// Delete a local branch; `force` also deletes unmerged branches.
    fn delete_branch(&self, repo: &Path, branch: &str, force: bool) -> CactusResult<()>;

    /// Push the current branch to its upstream.
    fn push(&self, repo: &Path) -> CactusResult<()>;

    /// Push `branch` to `remote` and record it as upstream.
    fn push_new_branch(&self, repo: &Path, remote: &str, branch: &str) -> CactusResult<()>;

    /// Stage every change, including deletions and untracked files.
    fn add_all(&self, repo: &Path) -> CactusResult<()>;

    /// Commit the index with `message`.
    fn commit(&self, repo: &Path, message: &str) -> CactusResult<()>;
}

/// Full git client as used by checkouts and workflows.
pub trait GitBackend: GitQuery + GitMutation + Send + Sync {}

impl<T: GitQuery + GitMutation + Send + Sync> GitBackend for T {}

// --- GixBackend Implementation (Pure Rust reads) ---

/// Git backend answering queries in-process with gix.
///
/// Mutations run through [`ShellBackend`] so hooks, credentials and
/// submodule handling behave exactly as on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct GixBackend;

impl GixBackend {
    fn discover(repo: &Path) -> CactusResult<gix::Repository> {
        gix::discover(repo)
            .map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))).into())
    }
}

impl GitQuery for GixBackend {
    fn is_dirty(&self, repo: &Path) -> CactusResult<bool> {
        use gix::status::UntrackedFiles;

        let repository = Self::discover(repo)?;
        let status_error = |e: &dyn std::fmt::Display| {
            GitError::Gix(GixError::Status {
                message: e.to_string(),
            })
        };

        let has_changes = repository
            .status(gix::progress::Discard)
            .map_err(|e| status_error(&e))?
            .untracked_files(UntrackedFiles::Files)
            .into_iter(None)
            .map_err(|e| status_error(&e))?
            .next()
            .is_some();

        Ok(has_changes)
    }

    fn current_branch(&self, repo: &Path) -> CactusResult<Option<String>> {
        let repository = Self::discover(repo)?;
        let head = repository
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn list_branches(&self, repo: &Path) -> CactusResult<Vec<Branch>> {
        let references_error = |e: &dyn std::fmt::Display| {
            GitError::Gix(GixError::References {
                message: e.to_string(),
            })
        };

        let repository = Self::discover(repo)?;
        let platform = repository
            .references()
            .map_err(|e| references_error(&e))?;
        let mut branches = Vec::new();
        for reference in platform.all().map_err(|e| references_error(&e))? {
            let reference = reference.map_err(|e| references_error(&e))?;
            let name = reference.name().as_bstr().to_string();
            branches.extend(Branch::from_ref(&name));
        }
        Ok(branches)
    }
}

impl GitMutation for GixBackend {
    fn switch_branch(&self, repo: &Path, branch: &str) -> CactusResult<()> {
        ShellBackend.switch_branch(repo, branch)
    }

    fn create_branch(
        &self,
        repo: &Path,
        branch: &str,
        start_point: Option<&str>,
    ) -> CactusResult<()> {
        ShellBackend.create_branch(repo, branch, start_point)
    }

    fn merge(&self, repo: &Path, branch: &str) -> CactusResult<()> {
        ShellBackend.merge(repo, branch)
    }

    fn tag(&self, repo: &Path, name: &str, force: bool) -> CactusResult<()> {
        ShellBackend.tag(repo, name, force)
    }

    fn delete_branch(&self, repo: &Path, branch: &str, force: bool) -> CactusResult<()> {
        ShellBackend.delete_branch(repo, branch, force)
    }

    fn push(&self, repo: &Path) -> CactusResult<()> {
        ShellBackend.push(repo)
    }

    fn push_new_branch(&self, repo: &Path, remote: &str, branch: &str) -> CactusResult<()> {
        ShellBackend.push_new_branch(repo, remote, branch)
    }

    fn add_all(&self, repo: &Path) -> CactusResult<()> {
        ShellBackend.add_all(repo)
    }

    fn commit(&self, repo: &Path, message: &str) -> CactusResult<()> {
        ShellBackend.commit(repo, message)
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Git backend driving the `git` executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellBackend;

impl ShellBackend {
    /// Execute a git command. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> CactusResult<String> {
        trace!(cwd = %cwd.display(), args = ?args, "git");

        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| std::io::Error::new(e.kind(), format!("failed to execute git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            } else {
                stderr
            };
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message,
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl GitQuery for ShellBackend {
    fn is_dirty(&self, repo: &Path) -> CactusResult<bool> {
        let output = Self::git_command(&["status", "--porcelain"], repo)?;
        Ok(!output.is_empty())
    }

    fn current_branch(&self, repo: &Path) -> CactusResult<Option<String>> {
        // `-q` turns a detached HEAD into a silent exit status 1
        Self::git_command(&["symbolic-ref", "--short", "-q", "HEAD"], repo)
            .map_or_else(|_| Ok(None), |branch| Ok(Some(branch)))
    }

    fn list_branches(&self, repo: &Path) -> CactusResult<Vec<Branch>> {
        let output = Self::git_command(
            &[
                "for-each-ref",
                "--format=%(refname)",
                "refs/heads",
                "refs/remotes",
            ],
            repo,
        )?;
        Ok(output.lines().filter_map(Branch::from_ref).collect())
    }
}

impl GitMutation for ShellBackend {
    fn switch_branch(&self, repo: &Path, branch: &str) -> CactusResult<()> {
        Self::git_command(&["checkout", "-q", branch], repo)?;
        Ok(())
    }

    fn create_branch(
        &self,
        repo: &Path,
        branch: &str,
        start_point: Option<&str>,
    ) -> CactusResult<()> {
        match start_point {
            Some(start) => {
                Self::git_command(&["checkout", "-q", "--track", "-b", branch, start], repo)?;
            }
            None => {
                Self::git_command(&["checkout", "-q", "-b", branch], repo)?;
            }
        }
        Ok(())
    }

    fn merge(&self, repo: &Path, branch: &str) -> CactusResult<()> {
        Self::git_command(&["merge", "--no-edit", "-q", branch], repo)?;
        Ok(())
    }

    fn tag(&self, repo: &Path, name: &str, force: bool) -> CactusResult<()> {
        if force {
            Self::git_command(&["tag", "-f", name], repo)?;
        } else {
            Self::git_command(&["tag", name], repo)?;
        }
        Ok(())
    }

    fn delete_branch(&self, repo: &Path, branch: &str, force: bool) -> CactusResult<()> {
        let flag = if force { "-D" } else { "-d" };
        Self::git_command(&["branch", flag, branch], repo)?;
        Ok(())
    }

    fn push(&self, repo: &Path) -> CactusResult<()> {
        Self::git_command(&["push", "-q"], repo)?;
        Ok(())
    }

    fn push_new_branch(&self, repo: &Path, remote: &str, branch: &str) -> CactusResult<()> {
        Self::git_command(&["push", "-q", "-u", remote, branch], repo)?;
        Ok(())
    }

    fn add_all(&self, repo: &Path) -> CactusResult<()> {
        Self::git_command(&["add", "-A"], repo)?;
        Ok(())
    }

    fn commit(&self, repo: &Path, message: &str) -> CactusResult<()> {
        Self::git_command(&["commit", "-q", "-m", message], repo)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
