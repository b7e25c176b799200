// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem traversal.
//!
//! ```text
//! walk:  parallel_walk()  ignore::WalkParallel (multi-core)
//!        walk_files()     sequential, glob filtered
//!        WalkOptions      max_depth, hidden, gitignore, skip_dirs
//! ```

pub mod walk;
