// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git access for multi-checkout workspaces.
//!
//! ```text
//! backend   GitQuery + GitMutation, GixBackend (gix reads), ShellBackend (git CLI)
//! branch    Branch, Branches, validate_branch_name
//! checkout  Checkout handle (cached dirty flag), root discovery
//! ```

pub mod backend;
pub mod branch;
pub mod checkout;

#[cfg(test)]
pub(crate) mod fake;


pub use backend::{GitBackend, GitMutation, GitQuery, GixBackend, ShellBackend};
pub use branch::{Branch, Branches};
pub use checkout::Checkout;
