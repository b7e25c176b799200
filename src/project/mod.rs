// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Maven projects, families, and the checkouts that contain them.
//!
//! ```text
//! ScopeContext::load(project dir)
//!        |
//!        v
//!   ProjectTree ---- checkouts --> [Checkout] --> [Pom]
//!        |
//!        v
//!   Scope::match_checkouts(family, group id, include root)
//! ```

pub mod family;
pub mod pom;
pub mod scope;
pub mod tree;


pub use family::ProjectFamily;
pub use pom::{Coordinates, Pom};
pub use scope::{Scope, ScopeContext, ScopeOptions};
pub use tree::ProjectTree;
