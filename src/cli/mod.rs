// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for cactus-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! cactus [global options] <command>
//! checkouts        [scope] [--require-clean]
//! merge            [scope] [--from B] [--into B] [--also-into B] ...
//! docs             [--output-folder DIR] [--commit-changes] [--skip]
//! codeflowers      [scope] [--families a,b] [--indent] ...
//! filter-families  --properties p,q [--families a,b]
//! metadata         [--output DIR]
//! options
//! version
//! ```

pub mod global;
pub mod merge;
pub mod project;
pub mod scope;


use clap::{Parser, Subcommand};

use crate::cli::global::GlobalOptions;
use crate::cli::merge::MergeArgs;
use crate::cli::project::{CodeflowersArgs, DocsArgs, FilterFamiliesArgs, MetadataArgs};
use crate::cli::scope::CheckoutsArgs;
use crate::config::ConfigLoader;
use crate::error::Result;

/// Multi-checkout git tooling for Maven trees.
#[derive(Debug, Parser)]
#[command(
    name = "cactus",
    author,
    version,
    about = "Multi-checkout git tooling for Maven trees",
    long_about = "cactus-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Operates on a tree of git checkouts holding Maven projects.\n\
                  Run it from (or point --project at) a project directory; the\n\
                  scope options decide which checkouts around it take part.",
    after_help = "CONFIGURATION:\n\n\
                  Settings are layered: built-in defaults, then `cactus.toml` in\n\
                  the current directory, then each --config file in order, then\n\
                  CACTUS_<SECTION>__<KEY> environment variables, then command-line\n\
                  flags. Use `cactus options` to print the effective values."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Lists the checkouts a scope resolves to.
    Checkouts(CheckoutsArgs),

    /// Merges a branch into another across checkouts.
    Merge(MergeArgs),

    /// Runs the documentation generator for the project.
    Docs(DocsArgs),

    /// Writes CodeFlowers data files for each family.
    Codeflowers(CodeflowersArgs),

    /// Prints skip properties for projects outside the given families.
    #[command(name = "filter-families")]
    FilterFamilies(FilterFamiliesArgs),

    /// Writes build and project properties files.
    Metadata(MetadataArgs),
}

impl Command {
    /// Adds this command's configuration overrides to `loader`.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be recorded.
    pub fn apply(&self, loader: ConfigLoader) -> Result<ConfigLoader> {
        match self {
            Self::Checkouts(args) => args.scope.apply(loader),
            Self::Merge(args) => args.apply(loader),
            Self::Docs(args) => args.apply(loader),
            Self::Codeflowers(args) => args.apply(loader),
            Self::Version | Self::Options | Self::FilterFamilies(_) | Self::Metadata(_) => {
                Ok(loader)
            }
        }
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> std::result::Result<Cli, clap::Error> {
    Cli::try_parse()
}
