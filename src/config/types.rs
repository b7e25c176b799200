// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! [global]       log levels, log file, pretend
//! [scope]        scope, include_root, family
//! [merge]        into, tag, push, delete_merged, require_clean
//! [docs]         command, args, update_readme, overwrite_resources, commit_changes
//! [codeflowers]  indent, source_glob, tolerate_version_inconsistencies
//! [scan]         threads
//! ```

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::logging::LogLevel;
use crate::project::Scope;

/// Global options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Optional log file; file logging is off when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Log mutating actions instead of performing them.
    pub pretend: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
            pretend: false,
        }
    }
}

/// Default checkout selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScopeConfig {
    pub scope: Scope,
    pub include_root: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            scope: Scope::Family,
            include_root: true,
            family: None,
        }
    }
}

/// Merge workflow defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    /// Branch merged into when `--into` is not given.
    pub into: String,
    pub tag: bool,
    pub push: bool,
    pub delete_merged: bool,
    /// Refuse to merge when any target checkout has local modifications.
    pub require_clean: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            into: "develop".to_string(),
            tag: true,
            push: false,
            delete_merged: false,
            require_clean: false,
        }
    }
}

/// Documentation tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocsConfig {
    /// Executable name or path, resolved through `PATH`.
    pub command: String,
    /// Extra arguments placed before the project directory.
    pub args: Vec<String>,
    pub update_readme: bool,
    pub overwrite_resources: bool,
    pub commit_changes: bool,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            command: "lexakai".to_string(),
            args: Vec::new(),
            update_readme: true,
            overwrite_resources: true,
            commit_changes: false,
        }
    }
}

/// Source statistics output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodeflowersConfig {
    /// Pretty-print generated JSON.
    pub indent: bool,
    /// Glob, relative to `src/main/java`, selecting scored files.
    pub source_glob: String,
    /// Families allowed to carry more than one project version.
    pub tolerate_version_inconsistencies: Vec<String>,
}

impl Default for CodeflowersConfig {
    fn default() -> Self {
        Self {
            indent: false,
            source_glob: "**/*.java".to_string(),
            tolerate_version_inconsistencies: Vec::new(),
        }
    }
}

/// Scanner worker pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Worker count; available parallelism when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<NonZeroUsize>,
}

impl ScanConfig {
    #[must_use]
    pub fn effective_threads(&self) -> NonZeroUsize {
        self.threads.unwrap_or_else(|| {
            std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
        })
    }
}
