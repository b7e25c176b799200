// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning for external tools.
//!
//! ```text
//! ProcessBuilder::which("lexakai")?
//!   .args() .cwd() .env() .flags() .name()
//!   .run().await
//!       --> tokio::process::Command
//!           stdout lines -> info!, stderr lines -> warn!
//!           (kept in ProcessOutput with KEEP_OUTPUT)
//!       --> exit code checked unless ALLOW_FAILURE
//! ```

pub mod builder;
mod runner;
#[cfg(test)]
mod tests;

pub use builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
