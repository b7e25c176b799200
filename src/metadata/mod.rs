// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build metadata properties files.
//!
//! ```text
//! <output>/project.properties          <output>/build.properties
//!   project-name        = kivakit        build-number = 104
//!   project-version     = 1.3.5          build-date   = 2021.03.18
//!   project-group-id    = com.telenav.kivakit
//!   project-artifact-id = kivakit
//! ```
//!
//! Build numbers count days since 2020-12-05 (UTC).


use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;
use tracing::info;

use crate::error::Result;
use crate::project::Pom;

/// Day number of 2020-12-05, counted from 1970-01-01.
pub const EPOCH_DAY: i64 = 18_601;

/// `num_days_from_ce()` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

pub const BUILD_PROPERTIES: &str = "build.properties";
pub const PROJECT_PROPERTIES: &str = "project.properties";

/// Number and date of one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildMetadata {
    date: NaiveDate,
}

impl BuildMetadata {
    /// Metadata for a build happening today (UTC).
    #[must_use]
    pub fn current() -> Self {
        Self::for_date(Utc::now().date_naive())
    }

    #[must_use]
    pub const fn for_date(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Days since [`EPOCH_DAY`].
    #[must_use]
    pub fn build_number(&self) -> i64 {
        i64::from(self.date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE - EPOCH_DAY
    }

    /// `yyyy.MM.dd`
    #[must_use]
    pub fn build_date(&self) -> String {
        self.date.format("%Y.%m.%d").to_string()
    }

    #[must_use]
    pub fn build_properties(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("build-number".to_string(), self.build_number().to_string()),
            ("build-date".to_string(), self.build_date()),
        ])
    }
}

/// Identity of `pom` as project properties.
///
/// Poms carry no display name here, so `project-name` is the artifact id.
#[must_use]
pub fn project_properties(pom: &Pom) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("project-name".to_string(), pom.artifact_id().to_string()),
        ("project-version".to_string(), pom.version().to_string()),
        ("project-group-id".to_string(), pom.group_id().to_string()),
        ("project-artifact-id".to_string(), pom.artifact_id().to_string()),
    ])
}

/// Renders `key = value` lines with the `=` signs aligned.
#[must_use]
pub fn render_properties(properties: &BTreeMap<String, String>) -> String {
    let width = properties.keys().map(String::len).max().unwrap_or(0);
    properties
        .iter()
        .map(|(key, value)| format!("{key:<width$} = {value}\n"))
        .collect()
}

/// Parses `key = value` lines; anything else is ignored.
///
/// # Errors
///
/// Returns an error if the line pattern fails to compile.
pub fn parse_properties(text: &str) -> Result<BTreeMap<String, String>> {
    let line = Regex::new(r"(?m)^[ \t]*([\w-]+)[ \t]*=[ \t]*(.*?)[ \t]*$")
        .context("failed to compile properties regex")?;
    Ok(line
        .captures_iter(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect())
}

/// Writes `project.properties` and `build.properties` into `output_dir`.
///
/// In pretend mode the contents are only logged. Returns the paths written
/// (or that would have been).
///
/// # Errors
///
/// Returns an error if the directory or a file cannot be written.
pub fn write_metadata(
    pom: &Pom,
    build: &BuildMetadata,
    output_dir: &Path,
    pretend: bool,
) -> Result<Vec<PathBuf>> {
    let files = [
        (PROJECT_PROPERTIES, render_properties(&project_properties(pom))),
        (BUILD_PROPERTIES, render_properties(&build.build_properties())),
    ];

    if !pretend {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("failed to create {}", output_dir.display()))?;
    }
    let mut written = Vec::with_capacity(files.len());
    for (name, contents) in files {
        let path = output_dir.join(name);
        if pretend {
            info!("Would write {}:\n{contents}", path.display());
        } else {
            std::fs::write(&path, contents)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(project = %pom, "Wrote {}", path.display());
        }
        written.push(path);
    }
    Ok(written)
}
