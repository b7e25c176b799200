// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution.
//!
//! ```text
//! run()
//!   build_command()  args, cwd, env, piped stdio
//!        |
//!        v
//!   spawn()  --> SpawnFailed
//!        |
//!        v
//!   join!(stdout lines, stderr lines, wait)
//!        |
//!        v
//!   exit code != 0 && !ALLOW_FAILURE --> NonZeroExit
//! ```

use std::fmt::Write as _;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, info, trace, warn};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::{ProcessError, Result};

#[derive(Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

impl ProcessBuilder {
    fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// The command line as it would be typed, for logs and errors.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut cmd = self.program().display().to_string();
        for arg in self.arguments() {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns the process and waits for it.
    ///
    /// Output lines are forwarded to the log as they arrive.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::SpawnFailed` if the process cannot start, and
    /// `ProcessError::NonZeroExit` if it fails without `ALLOW_FAILURE`.
    pub async fn run(self) -> Result<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();
        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut child = self
            .build_command()
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;
        trace!(process = %name, pid = ?child.id(), "spawned");

        let keep = self.process_flags().contains(ProcessFlags::KEEP_OUTPUT);
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let (stdout, stderr, status) = tokio::join!(
            forward(stdout, &name, Stream::Stdout, keep),
            forward(stderr, &name, Stream::Stderr, keep),
            child.wait(),
        );
        let status = status.map_err(|source| ProcessError::SpawnFailed {
            command: cmd_line.clone(),
            source,
        })?;
        // killed by a signal
        let exit_code = status.code().unwrap_or(-1);

        if exit_code != 0 && !self.process_flags().contains(ProcessFlags::ALLOW_FAILURE) {
            return Err(ProcessError::NonZeroExit {
                command: cmd_line,
                code: exit_code,
            }
            .into());
        }
        trace!(process = %name, exit_code, "completed");
        Ok(ProcessOutput::new(exit_code, stdout, stderr))
    }

    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());
        command.args(self.arguments());
        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }
        command.envs(self.environment());
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

async fn forward<R>(reader: Option<R>, name: &str, stream: Stream, keep: bool) -> String
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return String::new();
    };
    let mut kept = String::new();
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                match stream {
                    Stream::Stdout => info!(process = %name, "{line}"),
                    Stream::Stderr => warn!(process = %name, "{line}"),
                }
                if keep {
                    if !kept.is_empty() {
                        kept.push('\n');
                    }
                    kept.push_str(&line);
                }
            }
            Ok(None) => break,
            Err(e) => {
                debug!(process = %name, error = %e, "stopped reading output");
                break;
            }
        }
    }
    kept
}
