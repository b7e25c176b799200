// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Directory traversal on top of `ignore`.
//!
//! ```text
//! parallel_walk()  WalkParallel -> flume -> WalkResult { files, dirs }
//! walk_files()     sequential, optional wax glob on the relative path
//! WalkOptions      depth, hidden, gitignore, skip_dirs, threads
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bon::Builder;
use flume::bounded;
use ignore::WalkBuilder;
use tracing::warn;
use wax::{Glob, Program as _};

use crate::error::Result;

/// Options for directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Maximum depth to traverse (None = unlimited)
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
    #[builder(setters(name = with_include_hidden), default = false)]
    include_hidden: bool,
    #[builder(setters(name = with_respect_gitignore), default = true)]
    respect_gitignore: bool,
    /// Number of threads (None = auto-detect based on CPU count)
    #[builder(setters(name = with_threads))]
    threads: Option<usize>,
    /// Directory names never descended into (exact match)
    #[builder(setters(name = with_skip_dirs), default)]
    skip_dirs: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }

    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    #[must_use]
    pub const fn threads(&self) -> Option<usize> {
        self.threads
    }

    #[must_use]
    pub fn skip_dirs(&self) -> &[String] {
        &self.skip_dirs
    }

    /// Options for indexing a workspace of nested checkouts.
    ///
    /// Nested checkouts are frequently listed in the parent's `.gitignore`,
    /// so ignore files are not honoured; git metadata and build output are
    /// skipped by name.
    #[must_use]
    pub fn for_workspace() -> Self {
        Self::builder()
            .with_respect_gitignore(false)
            .with_skip_dirs(
                [".git", "target", "node_modules", ".idea"]
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            )
            .build()
    }
}

/// Result of a parallel walk operation.
#[derive(Debug)]
pub struct WalkResult {
    files: Vec<PathBuf>,
    directories: Vec<PathBuf>,
    error_count: usize,
}

impl WalkResult {
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    #[must_use]
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.error_count
    }
}

fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    if let Some(depth) = options.max_depth() {
        builder.max_depth(Some(depth));
    }
    builder.follow_links(options.follow_links());
    builder.hidden(!options.include_hidden());
    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());
    builder.ignore(options.respect_gitignore());
    builder.parents(options.respect_gitignore());

    if let Some(threads) = options.threads() {
        builder.threads(threads);
    }

    // filter_entry runs before descending, so skipped trees are never read
    if !options.skip_dirs().is_empty() {
        let skip_dirs: Arc<Vec<String>> = Arc::new(options.skip_dirs().to_vec());
        builder.filter_entry(move |entry| {
            !(entry.file_type().is_some_and(|ft| ft.is_dir())
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| skip_dirs.iter().any(|skip| skip == name)))
        });
    }

    builder
}

/// Walks `root` on all cores, collecting files and directories.
///
/// # Errors
///
/// Returns an error if the root directory does not exist.
///
/// # Example
/// ```no_run
/// use cactus_rs::utility::fs::walk::{parallel_walk, WalkOptions};
///
/// let result = parallel_walk("/path/to/workspace", &WalkOptions::for_workspace())?;
/// println!("Found {} files", result.files().len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn parallel_walk<P: AsRef<Path>>(root: P, options: &WalkOptions) -> Result<WalkResult> {
    let root = root.as_ref();

    if !root.exists() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    // Collected concurrently below; the bound only throttles walker threads
    let (file_tx, file_rx) = bounded::<PathBuf>(1000);
    let (dir_tx, dir_rx) = bounded::<PathBuf>(1000);
    let error_count = Arc::new(AtomicUsize::new(0));

    let parallel = build_walker(root, options).build_parallel();

    let (files, directories) = std::thread::scope(|scope| {
        let files = scope.spawn(move || file_rx.iter().collect::<Vec<_>>());
        let directories = scope.spawn(move || dir_rx.iter().collect::<Vec<_>>());

        parallel.run(|| {
            let file_tx = file_tx.clone();
            let dir_tx = dir_tx.clone();
            let error_count = Arc::clone(&error_count);

            Box::new(move |entry_result| {
                match entry_result {
                    Ok(entry) => {
                        let path = entry.path().to_path_buf();
                        match entry.file_type() {
                            Some(ft) if ft.is_dir() => {
                                let _ = dir_tx.send(path);
                            }
                            Some(ft) if ft.is_file() => {
                                let _ = file_tx.send(path);
                            }
                            _ => {}
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "walk error");
                        error_count.fetch_add(1, Ordering::Relaxed);
                    }
                }
                ignore::WalkState::Continue
            })
        });

        drop(file_tx);
        drop(dir_tx);
        (
            files.join().unwrap_or_default(),
            directories.join().unwrap_or_default(),
        )
    });

    Ok(WalkResult {
        files,
        directories,
        error_count: error_count.load(Ordering::Relaxed),
    })
}

/// Files under `root` in sorted order, optionally filtered by a glob on the
/// path relative to `root`.
///
/// Runs on the calling thread; meant for callers that already parallelise
/// across roots.
///
/// # Errors
///
/// Returns an error if the root does not exist or the glob is invalid.
pub fn walk_files(root: &Path, options: &WalkOptions, pattern: Option<&str>) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    let glob = pattern
        .map(|p| Glob::new(p).map_err(|e| anyhow::anyhow!("invalid glob pattern '{p}': {e}")))
        .transpose()?;

    let mut files = Vec::new();
    for entry in build_walker(root, options).build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "walk error");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let matches = match (&glob, entry.path().strip_prefix(root)) {
            (Some(glob), Ok(relative)) => glob.is_match(relative),
            (Some(_), Err(_)) => false,
            (None, _) => true,
        };
        if matches {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
