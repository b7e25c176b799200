// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{DocsRequest, run_docs};
use crate::config::DocsConfig;
use crate::error::ProcessError;
use crate::git::fake::FakeGit;
use crate::git::{GitBackend, ShellBackend};
use crate::project::{Coordinates, Pom, ProjectTree};
use crate::test_utils::{init_repo, run_git, temp_dir, write_pom};

fn kivakit_pom(dir: &Path) -> Pom {
    Pom::new(
        dir.join("pom.xml"),
        Coordinates {
            group_id: "com.telenav.kivakit".to_string(),
            artifact_id: "kivakit-core".to_string(),
            version: "1.2.0".to_string(),
        },
        "jar",
    )
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn test_output_folder_explicit_wins() {
    let temp = temp_dir();
    std::fs::create_dir_all(temp.path().join("kivakit-assets")).unwrap();
    let request = DocsRequest::builder()
        .with_output_folder(PathBuf::from("/explicit"))
        .build();
    let pom = kivakit_pom(&temp.path().join("kivakit/core"));

    let folder = request.output_folder_with(&pom, temp.path(), |_| Some("/from-env".to_string()));
    assert_eq!(folder, PathBuf::from("/explicit"));
}

#[test]
fn test_output_folder_environment_then_assets_then_target() {
    let temp = temp_dir();
    let request = DocsRequest::builder().build();
    let pom = kivakit_pom(&temp.path().join("kivakit/core"));

    let from_env = request.output_folder_with(&pom, temp.path(), |key| {
        (key == "KIVAKIT_ASSETS_HOME").then(|| "/assets/kivakit".to_string())
    });
    assert_eq!(from_env, PathBuf::from("/assets/kivakit"));

    assert_eq!(
        request.output_folder_with(&pom, temp.path(), no_env),
        temp.path().join("kivakit/core/target/lexakai")
    );

    std::fs::create_dir_all(temp.path().join("kivakit-assets")).unwrap();
    assert_eq!(
        request.output_folder_with(&pom, temp.path(), no_env),
        temp.path().join("kivakit-assets")
    );
}

#[test]
fn test_arguments() {
    let config = DocsConfig {
        args: vec!["-verbose".to_string()],
        update_readme: false,
        ..DocsConfig::default()
    };
    let request = DocsRequest::from_config(&config, None, false, false);

    let args = request.arguments(Path::new("/out"), Path::new("/ws/kivakit/core"));
    assert_eq!(
        args,
        vec![
            "-update-readme=false",
            "-overwrite-resources=true",
            "-output-folder=/out",
            "-verbose",
            "/ws/kivakit/core",
        ]
    );
    assert_eq!(request.command(), "lexakai");
    assert!(!request.commit_changes());
}

fn fake_tree(base: &Path) -> (ProjectTree, Pom) {
    let ws = base.join("ws");
    std::fs::create_dir_all(ws.join(".git")).unwrap();
    write_pom(&ws, "com.telenav.kivakit", "kivakit-core", "1.2.0", "jar");
    let fake: Arc<dyn GitBackend> = Arc::new(FakeGit::new());
    let tree = ProjectTree::scan(&ws, fake).unwrap();
    let pom = tree.all_projects().next().unwrap().clone();
    (tree, pom)
}

#[tokio::test]
async fn test_skip_runs_nothing() {
    let temp = temp_dir();
    let (tree, pom) = fake_tree(temp.path());
    let request = DocsRequest::builder()
        .with_command("nonexistent_docs_tool_12345")
        .with_skip(true)
        .build();

    let report = run_docs(&tree, &pom, &request).await.unwrap();
    assert!(!report.ran);
}

#[tokio::test]
async fn test_missing_command_is_hard_failure() {
    let temp = temp_dir();
    let (tree, pom) = fake_tree(temp.path());
    let request = DocsRequest::builder()
        .with_command("nonexistent_docs_tool_12345")
        .build();

    let err = run_docs(&tree, &pom, &request).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProcessError>(),
        Some(ProcessError::ExecutableNotFound { .. })
    ));
}

#[tokio::test]
async fn test_pretend_does_not_run() {
    let temp = temp_dir();
    let (tree, pom) = fake_tree(temp.path());
    let request = DocsRequest::builder()
        .with_command("false")
        .with_pretend(true)
        .build();

    let report = run_docs(&tree, &pom, &request).await.unwrap();
    assert!(!report.ran);
}

const GENERATOR: &str = r#"#!/bin/sh
for arg; do
  case "$arg" in
    -output-folder=*) out="${arg#-output-folder=}" ;;
  esac
done
mkdir -p "$out"
echo generated > "$out/index.md"
"#;

fn install_generator(dir: &Path) -> PathBuf {
    let path = dir.join("fake-lexakai");
    std::fs::write(&path, GENERATOR).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[tokio::test]
async fn test_commit_changes_commits_generated_files() {
    let temp = temp_dir();
    let ws = temp.path().join("ws");
    init_repo(&ws);
    write_pom(&ws, "com.telenav.kivakit", "kivakit-core", "1.2.0", "jar");
    run_git(&["add", "-A"], &ws);
    run_git(&["commit", "-q", "-m", "pom"], &ws);
    let generator = install_generator(temp.path());

    let tree = ProjectTree::for_project_dir(&ws, Arc::new(ShellBackend)).unwrap();
    let pom = tree.all_projects().next().unwrap().clone();
    let request = DocsRequest::builder()
        .with_command(generator.display().to_string())
        .with_output_folder(ws.join("docs"))
        .with_commit_changes(true)
        .build();

    let report = run_docs(&tree, &pom, &request).await.unwrap();

    assert!(report.ran);
    assert_eq!(report.changed.len(), 1);
    assert_eq!(report.commits.committed.len(), 1);
    assert!(report.commits.failed.is_empty());
    assert_eq!(
        run_git(&["log", "-1", "--format=%s"], &ws),
        "Generated commit com.telenav.kivakit:kivakit-core:1.2.0"
    );
    assert_eq!(run_git(&["status", "--porcelain"], &ws), "");
}

#[tokio::test]
async fn test_commit_changes_ignores_already_dirty_checkouts() {
    let temp = temp_dir();
    let ws = temp.path().join("ws");
    init_repo(&ws);
    write_pom(&ws, "com.telenav.kivakit", "kivakit-core", "1.2.0", "jar");
    let generator = install_generator(temp.path());

    let tree = ProjectTree::for_project_dir(&ws, Arc::new(ShellBackend)).unwrap();
    let pom = tree.all_projects().next().unwrap().clone();
    let request = DocsRequest::builder()
        .with_command(generator.display().to_string())
        .with_output_folder(ws.join("docs"))
        .with_commit_changes(true)
        .build();

    let report = run_docs(&tree, &pom, &request).await.unwrap();

    assert!(report.ran);
    assert!(report.changed.is_empty());
    assert_eq!(run_git(&["log", "-1", "--format=%s"], &ws), "initial");
}
