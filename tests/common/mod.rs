// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Runs git with a fixed identity and returns trimmed stdout.
pub fn git(args: &[&str], cwd: &Path) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub fn init_repo(path: &Path) {
    std::fs::create_dir_all(path).expect("failed to create repo dir");
    git(&["init", "-q", "-b", "main"], path);
    git(&["config", "user.email", "test@example.com"], path);
    git(&["config", "user.name", "Test"], path);
}

pub fn commit_all(path: &Path, message: &str) {
    git(&["add", "-A"], path);
    git(&["commit", "-q", "--allow-empty", "-m", message], path);
}

pub fn write_pom(dir: &Path, group_id: &str, artifact_id: &str, version: &str, packaging: &str) {
    std::fs::create_dir_all(dir).expect("failed to create project dir");
    let pom = format!(
        "<project>\n  <groupId>{group_id}</groupId>\n  <artifactId>{artifact_id}</artifactId>\n  \
         <version>{version}</version>\n  <packaging>{packaging}</packaging>\n</project>\n"
    );
    std::fs::write(dir.join("pom.xml"), pom).expect("failed to write pom");
}

/// ```text
/// ws/               repo, aggregator pom com.telenav:ws
///   kivakit/        repo, com.telenav.kivakit:kivakit-core 1.2.0
///   kivakit-ui/     repo, com.telenav.kivakit:kivakit-ui 1.2.0
///   lexakai/        repo, com.telenav.lexakai:lexakai 1.0.5
/// ```
///
/// Every child repository has `main` and `develop`. `ws` lists the children
/// in `.gitmodules` and ignores them, so only its own files count as changes.
pub fn build_workspace(base: &Path) -> PathBuf {
    let ws = base.join("ws");
    init_repo(&ws);
    write_pom(&ws, "com.telenav", "ws", "1.0.0", "pom");
    std::fs::write(ws.join(".gitignore"), "kivakit/\nkivakit-ui/\nlexakai/\n").unwrap();
    let modules: String = ["kivakit", "kivakit-ui", "lexakai"]
        .iter()
        .map(|dir| format!("[submodule \"{dir}\"]\n\tpath = {dir}\n\turl = ../{dir}.git\n"))
        .collect();
    std::fs::write(ws.join(".gitmodules"), modules).unwrap();
    commit_all(&ws, "initial");

    for (dir, group, artifact, version) in [
        ("kivakit", "com.telenav.kivakit", "kivakit-core", "1.2.0"),
        ("kivakit-ui", "com.telenav.kivakit", "kivakit-ui", "1.2.0"),
        ("lexakai", "com.telenav.lexakai", "lexakai", "1.0.5"),
    ] {
        let path = ws.join(dir);
        init_repo(&path);
        write_pom(&path, group, artifact, version, "jar");
        commit_all(&path, "initial");
        git(&["branch", "develop"], &path);
    }
    std::fs::canonicalize(ws).unwrap()
}
