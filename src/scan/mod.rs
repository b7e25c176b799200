// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Concurrent per-project source scoring.
//!
//! ```text
//!   projects (aggregators dropped)
//!        |
//!        v
//!   flume queue (pre-filled, sender dropped)
//!    |    |    |
//!    v    v    v
//!   w1   w2 .. caller        thread::scope joins all
//!    |
//!    +-- src/main/java missing -> skipped
//!    +-- walk + score -> BTreeMap<relative path, score> -> consumer
//!    +-- error / panic -> logged, next project
//! ```

pub mod codeflowers;


use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Context;
use flume::Receiver;
use tracing::{debug, error};

use crate::error::Result;
use crate::project::Pom;
use crate::utility::fs::walk::{WalkOptions, walk_files};

/// Scores of one project's source files, keyed by path relative to the
/// source root.
pub type ScanResult = BTreeMap<PathBuf, u64>;

/// Conventional Maven source directory, relative to the project.
pub const SOURCE_DIR: &str = "src/main/java";

/// Assigns a score to one source file.
pub trait SourceScorer: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn score(&self, path: &Path) -> Result<u64>;
}

/// Counts whitespace-separated tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordCount;

impl SourceScorer for WordCount {
    fn score(&self, path: &Path) -> Result<u64> {
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let words = String::from_utf8_lossy(&bytes).split_whitespace().count();
        Ok(u64::try_from(words).unwrap_or(u64::MAX))
    }
}

/// Counts from one [`ProjectsScanner::scan`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub scanned: usize,
    /// Projects without a source directory.
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Default)]
struct Counters {
    scanned: AtomicUsize,
    skipped: AtomicUsize,
    failed: AtomicUsize,
}

/// Runs a [`SourceScorer`] over many projects on a fixed worker count.
pub struct ProjectsScanner<S> {
    scorer: S,
    threads: NonZeroUsize,
    source_glob: Option<String>,
}

impl<S: SourceScorer> ProjectsScanner<S> {
    /// Scanner using every available core.
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            threads: std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
            source_glob: None,
        }
    }

    #[must_use]
    pub const fn with_threads(mut self, threads: NonZeroUsize) -> Self {
        self.threads = threads;
        self
    }

    /// Only score files whose path below the source root matches `glob`.
    #[must_use]
    pub fn with_source_glob(mut self, glob: impl Into<String>) -> Self {
        self.source_glob = Some(glob.into());
        self
    }

    /// Scores every non-aggregator project and hands each result to
    /// `consumer`. Blocks until all projects have been attempted.
    ///
    /// The calling thread works alongside `threads - 1` spawned workers. A
    /// project whose scan or consumer fails or panics is logged and counted;
    /// the others are unaffected.
    pub fn scan<C>(&self, projects: impl IntoIterator<Item = Pom>, consumer: C) -> ScanSummary
    where
        C: Fn(&Pom, &ScanResult) -> Result<()> + Sync,
    {
        let (tx, rx) = flume::unbounded();
        let mut queued = 0usize;
        for pom in projects.into_iter().filter(|pom| !pom.is_aggregator()) {
            // rx is alive, so send cannot fail
            let _ = tx.send(pom);
            queued += 1;
        }
        drop(tx);
        let workers = self.threads.get().min(queued.max(1));
        debug!(projects = queued, workers, "scanning projects");

        let counters = Counters::default();
        std::thread::scope(|scope| {
            for _ in 1..workers {
                let rx = rx.clone();
                let counters = &counters;
                let consumer = &consumer;
                scope.spawn(move || self.drain(&rx, consumer, counters));
            }
            self.drain(&rx, &consumer, &counters);
        });

        ScanSummary {
            scanned: counters.scanned.load(Ordering::Relaxed),
            skipped: counters.skipped.load(Ordering::Relaxed),
            failed: counters.failed.load(Ordering::Relaxed),
        }
    }

    fn drain<C>(&self, rx: &Receiver<Pom>, consumer: &C, counters: &Counters)
    where
        C: Fn(&Pom, &ScanResult) -> Result<()> + Sync,
    {
        for pom in rx.iter() {
            let outcome = catch_unwind(AssertUnwindSafe(|| self.scan_one(&pom, consumer)));
            match outcome {
                Ok(Ok(true)) => counters.scanned.fetch_add(1, Ordering::Relaxed),
                Ok(Ok(false)) => counters.skipped.fetch_add(1, Ordering::Relaxed),
                Ok(Err(e)) => {
                    let message = format!("{e:#}");
                    error!(project = %pom, error = %message, "Exception scanning project");
                    counters.failed.fetch_add(1, Ordering::Relaxed)
                }
                Err(panic) => {
                    let message = panic
                        .downcast_ref::<&str>()
                        .map(ToString::to_string)
                        .or_else(|| panic.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "unknown panic".to_string());
                    error!(project = %pom, panic = %message, "Panic scanning project");
                    counters.failed.fetch_add(1, Ordering::Relaxed)
                }
            };
        }
    }

    /// `Ok(false)` when the project has no source directory.
    fn scan_one<C>(&self, pom: &Pom, consumer: &C) -> Result<bool>
    where
        C: Fn(&Pom, &ScanResult) -> Result<()>,
    {
        let source_root = pom.project_dir().join(SOURCE_DIR);
        if !source_root.is_dir() {
            debug!(project = %pom, "no sources");
            return Ok(false);
        }

        let options = WalkOptions::builder().with_respect_gitignore(false).build();
        let files = walk_files(&source_root, &options, self.source_glob.as_deref())?;
        let mut result = ScanResult::new();
        for file in files {
            let score = self.scorer.score(&file)?;
            if let Ok(relative) = file.strip_prefix(&source_root) {
                result.insert(relative.to_path_buf(), score);
            }
        }
        debug!(project = %pom, files = result.len(), "scanned");
        consumer(pom, &result)?;
        Ok(true)
    }
}
