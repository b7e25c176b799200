// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Skip properties for projects outside the requested families.

use std::collections::BTreeSet;

use tracing::debug;

use crate::project::{ProjectFamily, ProjectTree};

/// Families to keep: `families` when it names any, else `family`.
#[must_use]
pub fn requested_families(family: Option<&str>, families: Option<&str>) -> BTreeSet<ProjectFamily> {
    let listed = families.map(ProjectFamily::from_comma_delimited).unwrap_or_default();
    if !listed.is_empty() {
        return listed;
    }
    family.map(ProjectFamily::from_comma_delimited).unwrap_or_default()
}

/// `<groupId>:<artifactId> <property>=true` for every project outside
/// `families`, once per property. Empty when either input is empty.
#[must_use]
pub fn skip_properties(
    tree: &ProjectTree,
    families: &BTreeSet<ProjectFamily>,
    properties: &[String],
) -> Vec<String> {
    if families.is_empty() || properties.is_empty() {
        debug!("no families or no properties, nothing to filter");
        return Vec::new();
    }
    let mut lines = Vec::new();
    for pom in tree.all_projects() {
        if families.contains(&pom.family()) {
            continue;
        }
        for property in properties {
            lines.push(format!("{}:{} {property}=true", pom.group_id(), pom.artifact_id()));
        }
    }
    lines
}

/// Splits `"a, b,,c"` into `["a", "b", "c"]`.
#[must_use]
pub fn split_properties(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
