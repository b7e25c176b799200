// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Minimal `pom.xml` reader.
//!
//! Only the project coordinates are needed. Comments and nested sections
//! are stripped before the first top-level `groupId`/`artifactId`/`version`/
//! `packaging` elements are read; a missing group id or version is inherited
//! from `<parent>`.

use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use regex::Regex;

use super::family::ProjectFamily;
use crate::error::{ProjectError, Result};

/// Sections whose children may repeat coordinate element names.
const NESTED_SECTIONS: &[&str] = &[
    "profiles",
    "build",
    "reporting",
    "dependencyManagement",
    "dependencies",
    "properties",
    "distributionManagement",
    "modules",
];

/// `groupId:artifactId:version`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// A Maven project descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pom {
    path: PathBuf,
    coordinates: Coordinates,
    packaging: String,
}

impl Pom {
    pub fn new(
        path: impl Into<PathBuf>,
        coordinates: Coordinates,
        packaging: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            coordinates,
            packaging: packaging.into(),
        }
    }

    /// Reads and parses the `pom.xml` at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or lacks coordinates.
    pub fn from_file(path: &Path) -> Result<Self> {
        let xml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(path, &xml)
    }

    /// Parses pom content; `path` is recorded as the descriptor location.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::PomParse` when the artifact id, or an
    /// uninheritable group id or version, is missing.
    pub fn parse(path: &Path, xml: &str) -> Result<Self> {
        let parse_error = |message: &str| ProjectError::PomParse {
            path: path.display().to_string(),
            message: message.to_string(),
        };

        let comments = Regex::new(r"(?s)<!--.*?-->").context("failed to compile comment regex")?;
        let mut body = comments.replace_all(xml, "").into_owned();

        let parent_block = Regex::new(r"(?s)<parent>(.*?)</parent>")
            .context("failed to compile parent regex")?;
        let parent = parent_block
            .captures(&body)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());
        body = parent_block.replace(&body, "").into_owned();

        for section in NESTED_SECTIONS {
            let block = Regex::new(&format!(r"(?s)<{section}>.*?</{section}>"))
                .with_context(|| format!("failed to compile {section} regex"))?;
            body = block.replace_all(&body, "").into_owned();
        }

        let parent_group = parent.as_deref().map(|p| element(p, "groupId")).transpose()?.flatten();
        let parent_version = parent.as_deref().map(|p| element(p, "version")).transpose()?.flatten();

        let artifact_id = element(&body, "artifactId")?.ok_or_else(|| parse_error("no artifactId"))?;
        let group_id = element(&body, "groupId")?
            .or(parent_group)
            .ok_or_else(|| parse_error("no groupId and no parent groupId"))?;
        let version = element(&body, "version")?
            .or(parent_version)
            .ok_or_else(|| parse_error("no version and no parent version"))?;
        let packaging = element(&body, "packaging")?.unwrap_or_else(|| "jar".to_string());

        Ok(Self::new(
            path,
            Coordinates {
                group_id,
                artifact_id,
                version,
            },
            packaging,
        ))
    }

    /// Location of the `pom.xml` itself.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the `pom.xml`.
    #[must_use]
    pub fn project_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    #[must_use]
    pub const fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    #[must_use]
    pub fn group_id(&self) -> &str {
        &self.coordinates.group_id
    }

    #[must_use]
    pub fn artifact_id(&self) -> &str {
        &self.coordinates.artifact_id
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.coordinates.version
    }

    #[must_use]
    pub fn packaging(&self) -> &str {
        &self.packaging
    }

    /// Aggregator poms carry no sources of their own.
    #[must_use]
    pub fn is_aggregator(&self) -> bool {
        self.packaging == "pom"
    }

    #[must_use]
    pub fn family(&self) -> ProjectFamily {
        ProjectFamily::from_group_id(self.group_id())
    }
}

impl fmt::Display for Pom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coordinates)
    }
}

impl PartialOrd for Pom {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pom {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path
            .cmp(&other.path)
            .then_with(|| self.coordinates.cmp(&other.coordinates))
    }
}

fn element(xml: &str, name: &str) -> Result<Option<String>> {
    let regex = Regex::new(&format!(r"<{name}>\s*([^<]*?)\s*</{name}>"))
        .with_context(|| format!("failed to compile {name} regex"))?;
    Ok(regex
        .captures(xml)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|value| !value.is_empty()))
}
