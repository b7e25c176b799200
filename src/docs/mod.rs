// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Runs the external documentation generator for one project.
//!
//! ```text
//! output folder:  --output-folder
//!              |  $<FAMILY>_ASSETS_HOME
//!              |  <root>/<family>-assets   (if a directory)
//!              v  <project>/target/lexakai
//!
//! <command> -update-readme=B -overwrite-resources=B -output-folder=DIR [args..] <project>
//!
//! commit_changes:  detect_incidental_changes(run) -> commit_incidental_changes
//! ```

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use bon::Builder;
use tracing::info;

use crate::config::DocsConfig;
use crate::core::process::ProcessBuilder;
use crate::error::Result;
use crate::git::Checkout;
use crate::project::{Pom, ProjectTree};
use crate::workflow::{
    CommitReport, GeneratedCommitMessage, commit_incidental_changes, detect_incidental_changes,
};

/// One documentation run.
#[derive(Debug, Clone, Builder)]
pub struct DocsRequest {
    #[builder(into, setters(name = with_command), default = "lexakai".to_string())]
    command: String,
    #[builder(setters(name = with_args), default)]
    args: Vec<String>,
    #[builder(setters(name = with_update_readme), default = true)]
    update_readme: bool,
    #[builder(setters(name = with_overwrite_resources), default = true)]
    overwrite_resources: bool,
    #[builder(setters(name = with_output_folder))]
    output_folder: Option<PathBuf>,
    #[builder(setters(name = with_commit_changes), default = false)]
    commit_changes: bool,
    #[builder(setters(name = with_skip), default = false)]
    skip: bool,
    #[builder(setters(name = with_pretend), default = false)]
    pretend: bool,
}

impl DocsRequest {
    /// Request seeded from the `[docs]` section.
    #[must_use]
    pub fn from_config(
        config: &DocsConfig,
        output_folder: Option<PathBuf>,
        skip: bool,
        pretend: bool,
    ) -> Self {
        Self::builder()
            .with_command(config.command.clone())
            .with_args(config.args.clone())
            .with_update_readme(config.update_readme)
            .with_overwrite_resources(config.overwrite_resources)
            .with_commit_changes(config.commit_changes)
            .maybe_with_output_folder(output_folder)
            .with_skip(skip)
            .with_pretend(pretend)
            .build()
    }

    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    #[must_use]
    pub const fn commit_changes(&self) -> bool {
        self.commit_changes
    }

    /// Output folder for `pom`, first match wins. See the module docs.
    #[must_use]
    pub fn output_folder_for(&self, pom: &Pom, submodule_root: &Path) -> PathBuf {
        self.output_folder_with(pom, submodule_root, |key| std::env::var(key).ok())
    }

    /// [`Self::output_folder_for`] with an explicit environment lookup.
    #[must_use]
    pub fn output_folder_with(
        &self,
        pom: &Pom,
        submodule_root: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> PathBuf {
        if let Some(explicit) = &self.output_folder {
            return explicit.clone();
        }
        pom.family()
            .assets_path_with(env, Some(submodule_root))
            .unwrap_or_else(|| pom.project_dir().join("target").join("lexakai"))
    }

    /// Arguments passed to the generator.
    #[must_use]
    pub fn arguments(&self, output_folder: &Path, project_dir: &Path) -> Vec<String> {
        let mut args = vec![
            format!("-update-readme={}", self.update_readme),
            format!("-overwrite-resources={}", self.overwrite_resources),
            format!("-output-folder={}", output_folder.display()),
        ];
        args.extend(self.args.iter().cloned());
        args.push(project_dir.display().to_string());
        args
    }
}

/// What a docs run did.
#[derive(Debug, Default)]
pub struct DocsReport {
    /// Whether the generator was started.
    pub ran: bool,
    /// Checkouts the generator modified, with commit results.
    pub changed: BTreeSet<Checkout>,
    pub commits: CommitReport,
}

/// Runs the generator for `pom`, committing what it changed when asked.
///
/// # Errors
///
/// Returns `ProcessError::ExecutableNotFound` if the command is not on
/// `PATH`, or the generator's failure.
pub async fn run_docs(tree: &ProjectTree, pom: &Pom, request: &DocsRequest) -> Result<DocsReport> {
    if request.skip {
        info!(project = %pom, "Skipping documentation");
        return Ok(DocsReport::default());
    }

    let output = request.output_folder_for(pom, tree.root().root());
    let process = ProcessBuilder::which(request.command())?
        .args(request.arguments(&output, pom.project_dir()))
        .cwd(pom.project_dir());
    info!("Documentation args:");
    info!("{}", process.command_line());

    if request.pretend {
        info!(project = %pom, "Pretend mode, not running {}", request.command());
        return Ok(DocsReport::default());
    }

    if !request.commit_changes {
        process.run().await?;
        return Ok(DocsReport {
            ran: true,
            ..DocsReport::default()
        });
    }

    let ((), changed) =
        detect_incidental_changes(tree, move || async move { process.run().await.map(|_| ()) })
            .await?;
    if changed.is_empty() {
        info!(project = %pom, "Documentation changed no checkouts");
        return Ok(DocsReport {
            ran: true,
            ..DocsReport::default()
        });
    }

    let message = GeneratedCommitMessage::new(pom.coordinates().clone(), &changed).to_string();
    let commits = commit_incidental_changes(tree, &changed, &message, false);
    Ok(DocsReport {
        ran: true,
        changed,
        commits,
    })
}
