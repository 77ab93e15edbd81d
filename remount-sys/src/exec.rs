// SPDX-License-Identifier: GPL-3.0-only

//! Single-attempt execution of external commands

use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::{RemountError, Result};

/// Exit status and captured standard output of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Process exit code; `-1` when the process was killed by a signal
    pub code: i32,

    /// Standard output, lines joined with `\n`
    pub stdout: String,
}

impl CommandOutput {
    pub fn new(code: i32, stdout: impl Into<String>) -> Self {
        Self {
            code,
            stdout: stdout.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Runs one external command line and waits for it.
///
/// `Err` is reserved for commands that could not be launched. A nonzero exit
/// is returned as a normal [`CommandOutput`] and must be checked by the caller.
pub trait CommandRunner {
    fn run(&self, command_line: &str) -> Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command_line: &str) -> Result<CommandOutput> {
        (**self).run(command_line)
    }
}

/// Split a command line into program and arguments on whitespace
pub fn split_command_line(command_line: &str) -> Result<(&str, Vec<&str>)> {
    let mut parts = command_line.split_whitespace();
    let program = parts.next().ok_or(RemountError::EmptyCommand)?;
    Ok((program, parts.collect()))
}

/// [`CommandRunner`] that spawns real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command_line: &str) -> Result<CommandOutput> {
        let (program, args) = split_command_line(command_line)?;
        debug!("Running `{}`", command_line);

        let output = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| RemountError::Spawn {
                command: command_line.to_string(),
                source,
            })?;

        let code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout)
            .lines()
            .collect::<Vec<_>>()
            .join("\n");

        if code != 0 {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("`{}` exited with {}: {}", command_line, code, stderr.trim());
        } else {
            debug!("`{}` exited with 0", command_line);
        }

        Ok(CommandOutput { code, stdout })
    }
}
