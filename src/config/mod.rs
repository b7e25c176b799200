// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for cactus-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. cactus.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. CACTUS_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! CACTUS_GLOBAL__PRETEND=true         → global.pretend = true
//! CACTUS_MERGE__REQUIRE_CLEAN=true    → merge.require_clean = true
//! CACTUS_DOCS__ARGS=-verbose,-x       → docs.args = ["-verbose", "-x"]
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;
use crate::project::ScopeOptions;

pub use loader::ConfigLoader;
pub use types::{CodeflowersConfig, DocsConfig, GlobalConfig, MergeConfig, ScanConfig, ScopeConfig};

/// File name picked up from the current directory.
pub const LOCAL_CONFIG_FILE: &str = "cactus.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "CACTUS";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub global: GlobalConfig,
    pub scope: ScopeConfig,
    pub merge: MergeConfig,
    pub docs: DocsConfig,
    pub codeflowers: CodeflowersConfig,
    pub scan: ScanConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cactus_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("cactus.toml")
    ///     .with_env_prefix("CACTUS")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not match `Config`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match
    /// `Config`.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Scope options seeded from `[scope]` and `[global]`.
    #[must_use]
    pub fn scope_options(&self) -> ScopeOptions {
        ScopeOptions {
            scope: self.scope.scope,
            include_root: self.scope.include_root,
            family: self.scope.family.clone(),
            pretend: self.global.pretend,
        }
    }

    /// Every option as `key = value`, aligned and sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_scope_options(&mut options);
        self.format_merge_options(&mut options);
        self.format_docs_options(&mut options);
        self.format_codeflowers_options(&mut options);
        options.insert(
            "scan.threads".into(),
            self.scan.effective_threads().to_string(),
        );

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("global.pretend".into(), self.global.pretend.to_string());
    }

    fn format_scope_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("scope.scope".into(), self.scope.scope.to_string());
        options.insert(
            "scope.include_root".into(),
            self.scope.include_root.to_string(),
        );
        if let Some(family) = &self.scope.family {
            options.insert("scope.family".into(), family.clone());
        }
    }

    fn format_merge_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("merge.into".into(), self.merge.into.clone());
        options.insert("merge.tag".into(), self.merge.tag.to_string());
        options.insert("merge.push".into(), self.merge.push.to_string());
        options.insert(
            "merge.delete_merged".into(),
            self.merge.delete_merged.to_string(),
        );
        options.insert(
            "merge.require_clean".into(),
            self.merge.require_clean.to_string(),
        );
    }

    fn format_docs_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("docs.command".into(), self.docs.command.clone());
        if !self.docs.args.is_empty() {
            options.insert("docs.args".into(), self.docs.args.join(" "));
        }
        options.insert(
            "docs.update_readme".into(),
            self.docs.update_readme.to_string(),
        );
        options.insert(
            "docs.overwrite_resources".into(),
            self.docs.overwrite_resources.to_string(),
        );
        options.insert(
            "docs.commit_changes".into(),
            self.docs.commit_changes.to_string(),
        );
    }

    fn format_codeflowers_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "codeflowers.indent".into(),
            self.codeflowers.indent.to_string(),
        );
        options.insert(
            "codeflowers.source_glob".into(),
            self.codeflowers.source_glob.clone(),
        );
        if !self.codeflowers.tolerate_version_inconsistencies.is_empty() {
            options.insert(
                "codeflowers.tolerate_version_inconsistencies".into(),
                self.codeflowers.tolerate_version_inconsistencies.join(","),
            );
        }
    }
}
