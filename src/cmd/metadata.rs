// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `metadata` command.

use anyhow::Context;

use crate::cli::global::GlobalOptions;
use crate::cli::project::MetadataArgs;
use crate::config::Config;
use crate::error::Result;
use crate::metadata::{BuildMetadata, write_metadata};
use crate::project::Pom;

/// Writes `project.properties` and `build.properties` for the project.
///
/// # Errors
///
/// Returns an error if the project's `pom.xml` cannot be read or the files
/// cannot be written.
pub fn run_metadata_command(
    args: &MetadataArgs,
    global: &GlobalOptions,
    config: &Config,
) -> Result<()> {
    let pom_path = global.project_dir().join("pom.xml");
    let pom = Pom::from_file(&pom_path)
        .with_context(|| format!("no usable project in {}", global.project_dir().display()))?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| pom.project_dir().join("target").join("classes"));
    write_metadata(&pom, &BuildMetadata::current(), &output, config.global.pretend)?;
    Ok(())
}
