// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{GitMutation, GitQuery, GixBackend, ShellBackend};
use crate::git::branch::Branch;
use crate::test_utils::{init_repo, run_git, temp_dir};

#[test]
fn test_shell_backend_dirty_state() {
    let temp = temp_dir();
    init_repo(temp.path());
    let git = ShellBackend;

    assert!(!git.is_dirty(temp.path()).unwrap());
    std::fs::write(temp.path().join("new.txt"), "x").unwrap();
    assert!(git.is_dirty(temp.path()).unwrap());

    git.add_all(temp.path()).unwrap();
    git.commit(temp.path(), "add new.txt").unwrap();
    assert!(!git.is_dirty(temp.path()).unwrap());
}

#[test]
fn test_shell_backend_current_branch_and_detached_head() {
    let temp = temp_dir();
    init_repo(temp.path());
    let git = ShellBackend;

    assert_eq!(git.current_branch(temp.path()).unwrap().as_deref(), Some("main"));

    run_git(&["checkout", "-q", "--detach"], temp.path());
    assert_eq!(git.current_branch(temp.path()).unwrap(), None);
}

#[test]
fn test_shell_backend_branch_lifecycle() {
    let temp = temp_dir();
    init_repo(temp.path());
    let git = ShellBackend;

    git.create_branch(temp.path(), "feature/x", None).unwrap();
    assert_eq!(
        git.current_branch(temp.path()).unwrap().as_deref(),
        Some("feature/x")
    );

    git.switch_branch(temp.path(), "main").unwrap();
    git.merge(temp.path(), "feature/x").unwrap();
    git.tag(temp.path(), "x", true).unwrap();
    git.tag(temp.path(), "x", true).unwrap();
    assert!(git.tag(temp.path(), "x", false).is_err());

    git.delete_branch(temp.path(), "feature/x", false).unwrap();
    let branches = git.list_branches(temp.path()).unwrap();
    assert_eq!(branches, vec![Branch::local("main")]);
}

#[test]
fn test_shell_backend_lists_remote_branches_and_pushes() {
    let temp = temp_dir();
    let upstream = temp.path().join("upstream.git");
    std::fs::create_dir_all(&upstream).unwrap();
    run_git(&["init", "-q", "--bare", "-b", "main"], &upstream);

    let work = temp.path().join("work");
    init_repo(&work);
    run_git(&["remote", "add", "origin", upstream.to_str().unwrap()], &work);

    let git = ShellBackend;
    git.push_new_branch(&work, "origin", "main").unwrap();
    git.create_branch(&work, "develop", None).unwrap();
    git.push_new_branch(&work, "origin", "develop").unwrap();

    let branches = git.branches(&work).unwrap();
    assert_eq!(branches.current_branch(), Some(&Branch::local("develop")));
    assert_eq!(
        branches.find("develop", false),
        Some(&Branch::remote("origin", "develop"))
    );

    std::fs::write(work.join("file.txt"), "content").unwrap();
    git.add_all(&work).unwrap();
    git.commit(&work, "more").unwrap();
    git.push(&work).unwrap();

    let remote_head = run_git(&["rev-parse", "develop"], &upstream);
    let local_head = run_git(&["rev-parse", "HEAD"], &work);
    assert_eq!(remote_head, local_head);
}

#[test]
fn test_shell_backend_create_tracking_branch() {
    let temp = temp_dir();
    let upstream = temp.path().join("upstream");
    init_repo(&upstream);
    run_git(&["branch", "release"], &upstream);

    let clone = temp.path().join("clone");
    run_git(
        &["clone", "-q", upstream.to_str().unwrap(), clone.to_str().unwrap()],
        temp.path(),
    );

    let git = ShellBackend;
    assert!(git.branches(&clone).unwrap().find("release", true).is_none());
    git.create_branch(&clone, "release", Some("origin/release")).unwrap();

    let upstream_of = run_git(
        &["rev-parse", "--abbrev-ref", "release@{upstream}"],
        &clone,
    );
    assert_eq!(upstream_of, "origin/release");
}

#[test]
fn test_shell_backend_failure_reports_command() {
    let temp = temp_dir();
    init_repo(temp.path());
    let err = ShellBackend
        .switch_branch(temp.path(), "does-not-exist")
        .unwrap_err();
    assert!(err.to_string().contains("git checkout -q does-not-exist"));
}

#[test]
fn test_gix_backend_dirty_state() {
    let temp = temp_dir();
    init_repo(temp.path());
    let git = GixBackend;

    assert!(!git.is_dirty(temp.path()).unwrap());
    std::fs::write(temp.path().join("new.txt"), "x").unwrap();
    assert!(git.is_dirty(temp.path()).unwrap());

    git.add_all(temp.path()).unwrap();
    assert!(git.is_dirty(temp.path()).unwrap());
    git.commit(temp.path(), "add new.txt").unwrap();
    assert!(!git.is_dirty(temp.path()).unwrap());

    std::fs::write(temp.path().join("new.txt"), "y").unwrap();
    assert!(git.is_dirty(temp.path()).unwrap());
}

#[test]
fn test_gix_backend_current_branch_and_detached_head() {
    let temp = temp_dir();
    init_repo(temp.path());
    let git = GixBackend;

    git.create_branch(temp.path(), "feature/x", None).unwrap();
    assert_eq!(
        git.current_branch(temp.path()).unwrap().as_deref(),
        Some("feature/x")
    );

    run_git(&["checkout", "-q", "--detach"], temp.path());
    assert_eq!(git.current_branch(temp.path()).unwrap(), None);
}

#[test]
fn test_gix_backend_lists_same_branches_as_git_cli() {
    let temp = temp_dir();
    let upstream = temp.path().join("upstream");
    init_repo(&upstream);
    run_git(&["branch", "release"], &upstream);

    let clone = temp.path().join("clone");
    run_git(
        &["clone", "-q", upstream.to_str().unwrap(), clone.to_str().unwrap()],
        temp.path(),
    );
    run_git(&["branch", "feature/y"], &clone);

    let mut from_gix = GixBackend.list_branches(&clone).unwrap();
    let mut from_cli = ShellBackend.list_branches(&clone).unwrap();
    from_gix.sort();
    from_cli.sort();
    assert_eq!(from_gix, from_cli);

    let branches = GixBackend.branches(&clone).unwrap();
    assert_eq!(branches.current_branch(), Some(&Branch::local("main")));
    assert_eq!(
        branches.find("release", false),
        Some(&Branch::remote("origin", "release"))
    );
    assert!(branches.find("feature/y", true).is_some());
}

#[test]
fn test_gix_backend_outside_git_is_an_error() {
    let temp = temp_dir();
    let err = GixBackend.current_branch(temp.path()).unwrap_err();
    assert!(err.to_string().starts_with("git error: gix error: failed to discover repository"));
}
