// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pending version changes and a one-shot change flag.
//!
//! ```text
//! VersionChangeUpdatesCollector
//!   pom versions     Pom -> VersionChange
//!   parent versions  Pom -> VersionChange
//!   ChangeFlag       OR of every effective mutation, reset on read
//! ```


use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::project::Pom;

/// Dirty flag whose read also clears it.
#[derive(Debug, Default)]
pub struct ChangeFlag(bool);

impl ChangeFlag {
    pub const fn mark(&mut self) {
        self.0 = true;
    }

    pub const fn or(&mut self, changed: bool) {
        self.0 |= changed;
    }

    /// Current value; the flag is `false` afterwards.
    pub const fn take_and_reset(&mut self) -> bool {
        let value = self.0;
        self.0 = false;
        value
    }
}

/// A version moving from one value to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChange {
    pub old: String,
    pub new: String,
}

impl VersionChange {
    #[must_use]
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }

    /// Whether the version actually moves.
    #[must_use]
    pub fn is_change(&self) -> bool {
        self.old != self.new
    }
}

impl fmt::Display for VersionChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.old, self.new)
    }
}

/// Pending pom and parent version changes.
///
/// Every mutator reports whether the stored data actually changed and ORs
/// that into a [`ChangeFlag`], so callers iterating to a fixed point can
/// ask [`Self::has_changes`] after each pass.
#[derive(Debug, Default)]
pub struct VersionChangeUpdatesCollector {
    pom_versions: BTreeMap<Pom, VersionChange>,
    parent_versions: BTreeMap<Pom, VersionChange>,
    changed: ChangeFlag,
}

impl VersionChangeUpdatesCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether anything changed since the last call. Resets the flag.
    pub const fn has_changes(&mut self) -> bool {
        self.changed.take_and_reset()
    }

    pub const fn mark(&mut self) {
        self.changed.mark();
    }

    pub const fn or(&mut self, changed: bool) {
        self.changed.or(changed);
    }

    pub fn change_pom_version(&mut self, pom: &Pom, change: VersionChange) -> bool {
        let changed = Self::put(&mut self.pom_versions, pom, change);
        self.changed.or(changed);
        changed
    }

    pub fn change_parent_version(&mut self, pom: &Pom, change: VersionChange) -> bool {
        let changed = Self::put(&mut self.parent_versions, pom, change);
        self.changed.or(changed);
        changed
    }

    pub fn remove_pom_version_change(&mut self, pom: &Pom) -> bool {
        let removed = self.pom_versions.remove(pom).is_some();
        if removed {
            debug!(pom = %pom, "pom version change removed");
        }
        self.changed.or(removed);
        removed
    }

    pub fn remove_parent_version_change(&mut self, pom: &Pom) -> bool {
        let removed = self.parent_versions.remove(pom).is_some();
        if removed {
            debug!(pom = %pom, "parent version change removed");
        }
        self.changed.or(removed);
        removed
    }

    #[must_use]
    pub fn pom_version_change(&self, pom: &Pom) -> Option<&VersionChange> {
        self.pom_versions.get(pom)
    }

    #[must_use]
    pub fn parent_version_change(&self, pom: &Pom) -> Option<&VersionChange> {
        self.parent_versions.get(pom)
    }

    pub fn pom_version_changes(&self) -> impl Iterator<Item = (&Pom, &VersionChange)> {
        self.pom_versions.iter()
    }

    pub fn parent_version_changes(&self) -> impl Iterator<Item = (&Pom, &VersionChange)> {
        self.parent_versions.iter()
    }

    fn put(map: &mut BTreeMap<Pom, VersionChange>, pom: &Pom, change: VersionChange) -> bool {
        let previous = map.insert(pom.clone(), change.clone());
        let changed = previous.as_ref() != Some(&change);
        if changed {
            match previous {
                Some(previous) => debug!(pom = %pom, "version change {previous} replaced by {change}"),
                None => debug!(pom = %pom, "version change {change} recorded"),
            }
        }
        changed
    }
}
