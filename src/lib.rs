// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |     checkouts / merge / docs / codeflowers
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!             workflow      docs      scan
//!          merge/changes  generator  word counts
//!                 |           |        |
//!                 +-----+-----+--------+
//!                       v
//!                    project
//!            pom / family / tree / scope
//!                       |
//!                       v
//!                      git
//!              checkout, branches, CLI
//!
//!   +-----------------------------------------+
//!   |  core      process runner               |
//!   |  metadata  build/project properties     |
//!   |  versions  pending version changes      |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod docs;
pub mod error;
pub mod git;
pub mod logging;
pub mod metadata;
pub mod project;
pub mod scan;
pub mod utility;
pub mod versions;
pub mod workflow;

#[cfg(test)]
pub(crate) mod test_utils;
