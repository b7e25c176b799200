// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!             CactusError (~24 bytes)
//!                     |
//!   +------+------+---+---+-------+----+-------+
//!   |      |      |       |       |    |       |
//!   v      v      v       v       v    v       v
//! Bail    Git  Config  Project Process Fs  Io/Other
//!         Box   Box     Box     Box    Box  Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Git      Gix, CommandFailed, NotACheckout, UncommittedChanges
//!   Config   ParseError, InvalidValue, ConflictingOptions
//!   Project  PomParse, InconsistentVersions, NoCheckoutsInFamilies
//!   Process  ExecutableNotFound, SpawnFailed, NonZeroExit
//!   Fs       NotFound, IoError
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`CactusError`].
pub type CactusResult<T> = std::result::Result<T, CactusError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum CactusError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Project tree or pom error.
    #[error("project error: {0}")]
    Project(#[from] Box<ProjectError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`CactusError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> CactusError {
    CactusError::Bailed(message.into().into_boxed_str())
}

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for CactusError {
                fn from(err: $error) -> Self {
                    CactusError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    ProjectError => Project,
    ProcessError => Process,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// Large error types are boxed to keep the enum small.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),

    /// Failed to walk the reference store.
    #[error("failed to list references: {message}")]
    References { message: String },

    /// Failed to compute work tree status.
    #[error("failed to check repository status: {message}")]
    Status { message: String },
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),

    /// The directory is not inside any git checkout.
    #[error("not inside a git checkout: {path}")]
    NotACheckout { path: String },

    /// Checkouts that must be clean carry local modifications.
    #[error("Some checkouts are locally modified:{}", format_checkout_list(.checkouts))]
    UncommittedChanges { checkouts: Vec<String> },

    /// Branch not found.
    #[error("branch not found: {branch}")]
    BranchNotFound { branch: String },
}

fn format_checkout_list(checkouts: &[String]) -> String {
    checkouts.iter().fold(String::new(), |mut out, name| {
        out.push_str("\n  * ");
        out.push_str(name);
        out
    })
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration source.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Two options were combined in a way that cannot work.
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },
}

// --- Project Errors ---

/// Errors about the Maven project tree.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// A `pom.xml` could not be understood.
    #[error("cannot parse {path}: {message}")]
    PomParse { path: String, message: String },

    /// No `pom.xml` in the requested project directory.
    #[error("no pom.xml in {path}")]
    NoProject { path: String },

    /// Projects of one family disagree about their version.
    #[error("inconsistent versions in family '{family}': {}", .versions.join(", "))]
    InconsistentVersions { family: String, versions: Vec<String> },

    /// A family filter matched nothing.
    #[error("No checkouts in families {families}")]
    NoCheckoutsInFamilies { families: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
