// SPDX-License-Identifier: GPL-3.0-only

use std::cell::RefCell;
use std::io;

use crate::exec::{CommandOutput, CommandRunner};
use crate::{RemountError, Result};

#[derive(Debug, Clone)]
enum Reply {
    Output(CommandOutput),
    LaunchFailure,
}

/// Scripted [`CommandRunner`] recording every command line it receives.
///
/// A rule matches a command line that equals its pattern or starts with the
/// pattern followed by a space. The longest matching pattern wins; unmatched
/// commands exit with 127.
#[derive(Debug, Default)]
pub(crate) struct ScriptedRunner {
    rules: Vec<(String, Reply)>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(mut self, pattern: &str, code: i32, stdout: &str) -> Self {
        self.rules.push((
            pattern.to_string(),
            Reply::Output(CommandOutput::new(code, stdout)),
        ));
        self
    }

    pub(crate) fn ok(self, pattern: &str) -> Self {
        self.reply(pattern, 0, "")
    }

    pub(crate) fn fail(self, pattern: &str) -> Self {
        self.reply(pattern, 32, "")
    }

    pub(crate) fn unlaunchable(mut self, pattern: &str) -> Self {
        self.rules.push((pattern.to_string(), Reply::LaunchFailure));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Whether any recorded command starts with `program`
    pub(crate) fn ran(&self, program: &str) -> bool {
        self.calls
            .borrow()
            .iter()
            .any(|call| call == program || call.starts_with(&format!("{program} ")))
    }

    fn lookup(&self, command_line: &str) -> Option<&Reply> {
        self.rules
            .iter()
            .filter(|(pattern, _)| {
                command_line == pattern || command_line.starts_with(&format!("{pattern} "))
            })
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, reply)| reply)
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command_line: &str) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(command_line.to_string());

        match self.lookup(command_line) {
            Some(Reply::Output(output)) => Ok(output.clone()),
            Some(Reply::LaunchFailure) => Err(RemountError::Spawn {
                command: command_line.to_string(),
                source: io::Error::from(io::ErrorKind::NotFound),
            }),
            None => Ok(CommandOutput::new(127, "")),
        }
    }
}
