// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `CodeFlowers` data files from scan results.
//!
//! ```text
//! <assets>/docs/<version>/codeflowers/site/data/
//!   <artifactId>.json   {"name": .., "children": [dirs.., {"name": file, "size": score}]}
//!   <artifactId>.wc     "<score> <relative/path>" per file, path order
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tracing::info;

use super::ScanResult;
use crate::error::{ProjectError, Result};
use crate::git::Checkout;
use crate::project::{Pom, ProjectFamily, ProjectTree};

/// Output directory below a family's assets root.
#[must_use]
pub fn data_dir(assets_root: &Path, version: &str) -> PathBuf {
    assets_root
        .join("docs")
        .join(version)
        .join("codeflowers")
        .join("site")
        .join("data")
}

/// Non-aggregator projects of `checkouts`, grouped by family.
#[must_use]
pub fn projects_by_family(
    tree: &ProjectTree,
    checkouts: &[Checkout],
) -> BTreeMap<ProjectFamily, Vec<Pom>> {
    let mut result: BTreeMap<ProjectFamily, Vec<Pom>> = BTreeMap::new();
    for checkout in checkouts {
        for pom in tree.projects_within(checkout) {
            if !pom.is_aggregator() {
                result.entry(pom.family()).or_default().push(pom.clone());
            }
        }
    }
    result
}

/// The single version shared by `poms`.
///
/// When versions disagree and `tolerate` is set, the most common version
/// wins, ties going to the greatest version string. `None` for no poms.
///
/// # Errors
///
/// Returns `ProjectError::InconsistentVersions` when versions disagree and
/// `tolerate` is false.
pub fn family_version(
    family: &ProjectFamily,
    poms: &[Pom],
    tolerate: bool,
) -> std::result::Result<Option<String>, ProjectError> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for pom in poms {
        *counts.entry(pom.version()).or_default() += 1;
    }
    if counts.len() > 1 && !tolerate {
        return Err(ProjectError::InconsistentVersions {
            family: family.to_string(),
            versions: counts.keys().map(ToString::to_string).collect(),
        });
    }
    Ok(counts
        .into_iter()
        .max_by(|(a_version, a_count), (b_version, b_count)| {
            a_count.cmp(b_count).then_with(|| a_version.cmp(b_version))
        })
        .map(|(version, _)| version.to_string()))
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Node {
    Directory { name: String, children: Vec<Node> },
    File { name: String, size: u64 },
}

#[derive(Default)]
struct DirectoryBuilder {
    directories: BTreeMap<String, DirectoryBuilder>,
    files: Vec<(String, u64)>,
}

impl DirectoryBuilder {
    fn insert(&mut self, path: &Path, size: u64) {
        let mut components: Vec<String> = path
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let Some(file) = components.pop() else {
            return;
        };
        let mut dir = self;
        for component in components {
            dir = dir.directories.entry(component).or_default();
        }
        dir.files.push((file, size));
    }

    fn build(self, name: String) -> Node {
        let mut children: Vec<Node> = self
            .directories
            .into_iter()
            .map(|(name, dir)| dir.build(name))
            .collect();
        children.extend(
            self.files
                .into_iter()
                .map(|(name, size)| Node::File { name, size }),
        );
        Node::Directory { name, children }
    }
}

/// Nested JSON tree for one project.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(name: &str, results: &ScanResult, indent: bool) -> Result<String> {
    let mut root = DirectoryBuilder::default();
    for (path, score) in results {
        root.insert(path, *score);
    }
    let tree = root.build(name.to_string());
    let json = if indent {
        serde_json::to_string_pretty(&tree)
    } else {
        serde_json::to_string(&tree)
    };
    json.context("failed to serialize codeflowers tree")
}

/// Word-count listing for one project.
#[must_use]
pub fn render_word_counts(results: &ScanResult) -> String {
    results
        .iter()
        .map(|(path, score)| {
            let path = path
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            format!("{score} {path}\n")
        })
        .collect()
}

/// Writes the data files for each scanned project of one family.
#[derive(Debug, Clone)]
pub struct CodeflowersWriter {
    family: ProjectFamily,
    output_dir: PathBuf,
    indent: bool,
    pretend: bool,
}

impl CodeflowersWriter {
    #[must_use]
    pub const fn new(family: ProjectFamily, output_dir: PathBuf, indent: bool, pretend: bool) -> Self {
        Self {
            family,
            output_dir,
            indent,
            pretend,
        }
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Scanner consumer: writes `<artifactId>.json` and `<artifactId>.wc`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or a file cannot be written.
    pub fn write(&self, pom: &Pom, results: &ScanResult) -> Result<()> {
        let json = render_json(pom.artifact_id(), results, self.indent)?;
        let word_counts = render_word_counts(results);
        let json_path = self.output_dir.join(format!("{}.json", pom.artifact_id()));
        let wc_path = self.output_dir.join(format!("{}.wc", pom.artifact_id()));

        if self.pretend {
            info!(family = %self.family, "would write {} and {}", json_path.display(), wc_path.display());
            return Ok(());
        }

        std::fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("failed to create {}", self.output_dir.display()))?;
        std::fs::write(&json_path, json)
            .with_context(|| format!("failed to write {}", json_path.display()))?;
        std::fs::write(&wc_path, word_counts)
            .with_context(|| format!("failed to write {}", wc_path.display()))?;
        info!(family = %self.family, project = pom.artifact_id(), "wrote {}", json_path.display());
        Ok(())
    }
}

/// Families whose checkouts replace the scope's, for `--families`.
///
/// # Errors
///
/// Returns `ProjectError::NoCheckoutsInFamilies` when no checkout matches.
pub fn checkouts_in_families(
    tree: &ProjectTree,
    families: &BTreeSet<ProjectFamily>,
) -> std::result::Result<Vec<Checkout>, ProjectError> {
    let mut checkouts: Vec<Checkout> = Vec::new();
    for family in families {
        for checkout in tree.checkouts_in_family(family) {
            if !checkouts.contains(&checkout) {
                checkouts.push(checkout);
            }
        }
    }
    if checkouts.is_empty() {
        return Err(ProjectError::NoCheckoutsInFamilies {
            families: families
                .iter()
                .map(ProjectFamily::name)
                .collect::<Vec<_>>()
                .join(", "),
        });
    }
    Ok(checkouts)
}
