// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Project families derived from Maven group ids.
//!
//! ```text
//! com.telenav.kivakit             -> kivakit
//! com.telenav.kivakit.extensions  -> extensions   (parent: kivakit)
//! com.telenav.mesakit-tools       -> mesakit
//! org.example.-odd                -> -odd          (hyphen at 0 is kept)
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// A named grouping of projects released together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectFamily(String);

impl ProjectFamily {
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Family of a group id: its final dot-segment, truncated at the first
    /// hyphen unless the hyphen leads the segment.
    #[must_use]
    pub fn from_group_id(group_id: &str) -> Self {
        let last = group_id.rsplit('.').next().unwrap_or(group_id);
        Self(family_segment(last).to_string())
    }

    /// Family one level up: the second-to-last dot-segment of the group id.
    #[must_use]
    pub fn parent_of_group_id(group_id: &str) -> Option<Self> {
        let mut segments = group_id.rsplit('.');
        segments.next()?;
        segments
            .next()
            .filter(|s| !s.is_empty())
            .map(|s| Self(family_segment(s).to_string()))
    }

    /// Parses `"a, b,,c"` into `{a, b, c}`; blank entries are ignored.
    #[must_use]
    pub fn from_comma_delimited(value: &str) -> BTreeSet<Self> {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::named)
            .collect()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// `KIVAKIT_ASSETS_HOME` for `kivakit`.
    #[must_use]
    pub fn environment_variable_name(&self) -> String {
        format!("{}_ASSETS_HOME", self.0.to_uppercase().replace('-', "_"))
    }

    /// Assets checkout for this family, looked up through the process
    /// environment. See [`Self::assets_path_with`].
    #[must_use]
    pub fn assets_path(&self, submodule_root: Option<&Path>) -> Option<PathBuf> {
        self.assets_path_with(|key| std::env::var(key).ok(), submodule_root)
    }

    /// Assets checkout: `$<FAMILY>_ASSETS_HOME` when set, else
    /// `<submodule root>/<family>-assets` when that directory exists.
    #[must_use]
    pub fn assets_path_with(
        &self,
        env: impl Fn(&str) -> Option<String>,
        submodule_root: Option<&Path>,
    ) -> Option<PathBuf> {
        if let Some(value) = env(&self.environment_variable_name())
            && !value.trim().is_empty()
        {
            return Some(PathBuf::from(value.trim()));
        }
        submodule_root
            .map(|root| root.join(format!("{}-assets", self.0)))
            .filter(|candidate| candidate.is_dir())
    }
}

fn family_segment(segment: &str) -> &str {
    match segment.find('-') {
        Some(ix) if ix > 0 => &segment[..ix],
        _ => segment,
    }
}

impl fmt::Display for ProjectFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
