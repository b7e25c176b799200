// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for command handlers.
//!
//! Each test parses a realistic command line, loads the layered config and
//! runs the handler against a real workspace.

mod common;

use std::path::Path;

use cactus_rs::cli::{self, Cli, Command};
use cactus_rs::cmd::checkouts::run_checkouts_command;
use cactus_rs::cmd::codeflowers::run_codeflowers_command;
use cactus_rs::cmd::load_config;
use cactus_rs::cmd::merge::{merge_flags, run_merge_command};
use cactus_rs::cmd::metadata::run_metadata_command;
use cactus_rs::config::Config;
use cactus_rs::metadata::parse_properties;
use cactus_rs::workflow::MergeFlags;

use common::{build_workspace, commit_all, git, temp_dir};

fn parse(project: &Path, args: &[&str]) -> (Cli, Config) {
    let project = project.display().to_string();
    let mut argv = vec!["cactus", "-p", project.as_str()];
    argv.extend_from_slice(args);
    let cli = cli::parse_from(argv);
    let config = load_config(&cli).unwrap();
    (cli, config)
}

// =============================================================================
// merge
// =============================================================================

#[test]
fn merge_command_flags_follow_cli() {
    let temp = temp_dir();
    let (_, config) = parse(temp.path(), &["merge", "--no-tag", "--push"]);
    assert_eq!(merge_flags(&config), MergeFlags::PUSH);

    let (_, config) = parse(temp.path(), &["--pretend", "merge", "--delete-merged"]);
    assert_eq!(
        merge_flags(&config),
        MergeFlags::TAG | MergeFlags::DELETE_MERGED | MergeFlags::PRETEND
    );
}

#[test]
fn merge_command_merges_whole_family() {
    let temp = temp_dir();
    let ws = build_workspace(temp.path());
    for dir in ["kivakit", "kivakit-ui"] {
        let path = ws.join(dir);
        git(&["switch", "-q", "-c", "feature/search"], &path);
        std::fs::write(path.join("search.txt"), dir).unwrap();
        commit_all(&path, "search");
    }

    let (cli, config) = parse(&ws.join("kivakit"), &["merge", "--into", "develop", "--no-include-root"]);
    let Some(Command::Merge(args)) = &cli.command else {
        panic!("expected merge command");
    };
    run_merge_command(args, &cli.global, &config).unwrap();

    for dir in ["kivakit", "kivakit-ui"] {
        let path = ws.join(dir);
        assert_eq!(git(&["branch", "--show-current"], &path), "develop");
        assert_eq!(git(&["tag", "--list"], &path), "search");
    }
    assert_eq!(git(&["branch", "--show-current"], &ws.join("lexakai")), "main");
}

#[test]
fn merge_command_rejects_families_outside_family_scope() {
    let temp = temp_dir();
    let ws = build_workspace(temp.path());

    let (cli, config) = parse(
        &ws.join("kivakit"),
        &["merge", "--scope", "all", "--families", "lexakai"],
    );
    let Some(Command::Merge(args)) = &cli.command else {
        panic!("expected merge command");
    };
    let err = run_merge_command(args, &cli.global, &config).unwrap_err();
    insta::assert_snapshot!(
        format!("{err:#}"),
        @"conflicting options: families can only be used with scope 'family', not 'all'"
    );
}

#[test]
fn merge_command_require_clean_stops_before_merging() {
    let temp = temp_dir();
    let ws = build_workspace(temp.path());
    let kivakit = ws.join("kivakit");
    git(&["switch", "-q", "-c", "feature/x"], &kivakit);
    std::fs::write(kivakit.join("wip.txt"), "wip").unwrap();

    let (cli, config) = parse(&kivakit, &["merge", "--scope", "just-this", "--require-clean"]);
    let Some(Command::Merge(args)) = &cli.command else {
        panic!("expected merge command");
    };
    assert!(run_merge_command(args, &cli.global, &config).is_err());
    assert_eq!(git(&["branch", "--show-current"], &kivakit), "feature/x");
}

// =============================================================================
// checkouts
// =============================================================================

#[test]
fn checkouts_command_require_clean() {
    let temp = temp_dir();
    let ws = build_workspace(temp.path());
    let lexakai = ws.join("lexakai");

    let (cli, config) = parse(&lexakai, &["checkouts", "--scope", "just-this", "--require-clean"]);
    let Some(Command::Checkouts(args)) = &cli.command else {
        panic!("expected checkouts command");
    };
    run_checkouts_command(args, &cli.global, &config).unwrap();

    std::fs::write(lexakai.join("wip.txt"), "wip").unwrap();
    assert!(run_checkouts_command(args, &cli.global, &config).is_err());
}

// =============================================================================
// codeflowers
// =============================================================================

#[test]
fn codeflowers_command_writes_family_data() {
    let temp = temp_dir();
    let ws = build_workspace(temp.path());
    let sources = ws.join("kivakit/src/main/java/com/telenav");
    std::fs::create_dir_all(&sources).unwrap();
    std::fs::write(sources.join("Core.java"), "public class Core { }\n").unwrap();
    std::fs::create_dir_all(ws.join("kivakit-assets")).unwrap();

    let (cli, config) = parse(&ws.join("kivakit"), &["codeflowers", "--threads", "2"]);
    let Some(Command::Codeflowers(args)) = &cli.command else {
        panic!("expected codeflowers command");
    };
    run_codeflowers_command(args, &cli.global, &config).unwrap();

    let data = ws.join("kivakit-assets/docs/1.2.0/codeflowers/site/data");
    let json = std::fs::read_to_string(data.join("kivakit-core.json")).unwrap();
    insta::assert_snapshot!(
        json,
        @r#"{"name":"kivakit-core","children":[{"name":"com","children":[{"name":"telenav","children":[{"name":"Core.java","size":5}]}]}]}"#
    );
    let wc = std::fs::read_to_string(data.join("kivakit-core.wc")).unwrap();
    assert_eq!(wc, "5 com/telenav/Core.java\n");
    assert!(!data.join("kivakit-ui.json").exists());
}

#[test]
fn codeflowers_command_unknown_families_fail() {
    let temp = temp_dir();
    let ws = build_workspace(temp.path());

    let (cli, config) = parse(&ws.join("kivakit"), &["codeflowers", "--families", "galaxy"]);
    let Some(Command::Codeflowers(args)) = &cli.command else {
        panic!("expected codeflowers command");
    };
    let err = run_codeflowers_command(args, &cli.global, &config).unwrap_err();
    insta::assert_snapshot!(format!("{err:#}"), @"No checkouts in families galaxy");
}

// =============================================================================
// metadata
// =============================================================================

#[test]
fn metadata_command_writes_properties() {
    let temp = temp_dir();
    let ws = build_workspace(temp.path());
    let out = temp.path().join("out");
    let out_arg = out.display().to_string();

    let (cli, config) = parse(&ws.join("lexakai"), &["metadata", "-o", out_arg.as_str()]);
    let Some(Command::Metadata(args)) = &cli.command else {
        panic!("expected metadata command");
    };
    run_metadata_command(args, &cli.global, &config).unwrap();

    let project = parse_properties(&std::fs::read_to_string(out.join("project.properties")).unwrap())
        .unwrap();
    assert_eq!(project["project-artifact-id"], "lexakai");
    assert_eq!(project["project-version"], "1.0.5");
    let build = parse_properties(&std::fs::read_to_string(out.join("build.properties")).unwrap())
        .unwrap();
    assert!(build["build-number"].parse::<i64>().unwrap() > 0);
}

#[test]
fn metadata_command_pretend_writes_nothing() {
    let temp = temp_dir();
    let ws = build_workspace(temp.path());
    let out = temp.path().join("out");
    let out_arg = out.display().to_string();

    let (cli, config) = parse(&ws.join("lexakai"), &["--pretend", "metadata", "-o", out_arg.as_str()]);
    let Some(Command::Metadata(args)) = &cli.command else {
        panic!("expected metadata command");
    };
    run_metadata_command(args, &cli.global, &config).unwrap();
    assert!(!out.exists());
}
