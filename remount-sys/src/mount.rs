// SPDX-License-Identifier: GPL-3.0-only

//! Mount, unmount and mount-table queries

use remount_types::{FilesystemType, Tool, ToolSet};
use tracing::{debug, info};

use crate::exec::CommandRunner;
use crate::{RemountError, Result};

/// Whether `listing` (output of `mount` without arguments) has an entry for
/// `path_or_device`.
///
/// A line matches only when one of its whitespace-separated fields equals the
/// query, so `/mnt/data` does not match `/mnt/data2` or `/srv/mnt/data`.
pub fn mount_table_contains(listing: &str, path_or_device: &str) -> bool {
    let needle = normalize(path_or_device);
    if needle.is_empty() {
        return false;
    }

    listing
        .lines()
        .any(|line| line.split_whitespace().any(|field| field == needle))
}

fn normalize(path: &str) -> &str {
    let path = path.trim();
    match path.trim_end_matches('/') {
        "" if path.starts_with('/') => "/",
        trimmed => trimmed,
    }
}

/// Runs the mount tools through a [`CommandRunner`]
#[derive(Debug)]
pub struct MountController<'a, R> {
    runner: &'a R,
    tools: &'a ToolSet,
}

impl<'a, R: CommandRunner> MountController<'a, R> {
    pub fn new(runner: &'a R, tools: &'a ToolSet) -> Self {
        Self { runner, tools }
    }

    /// Mount `device` at `target` with the tool suited to `fs`.
    ///
    /// `options` is passed through verbatim (e.g. `-o rw,nouuid`); an empty
    /// string means a plain mount.
    pub fn mount(
        &self,
        fs: FilesystemType,
        device: &str,
        target: &str,
        options: &str,
    ) -> Result<()> {
        let program = self.tools.program(fs.mount_tool().tool());
        let command = [program, options.trim(), device, target]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        info!("Mounting {} ({}) at {}", device, fs, target);
        let output = self.runner.run(&command)?;
        if !output.success() {
            return Err(RemountError::MountFailed {
                device: device.to_string(),
                mount_path: target.to_string(),
            });
        }
        Ok(())
    }

    pub fn unmount(&self, path_or_device: &str) -> Result<()> {
        let command = format!("{} {}", self.tools.program(Tool::Umount), path_or_device);

        info!("Unmounting {}", path_or_device);
        let output = self.runner.run(&command)?;
        if !output.success() {
            return Err(RemountError::UnmountFailed(path_or_device.to_string()));
        }
        Ok(())
    }

    /// Whether `path_or_device` shows up in the current mount table
    pub fn is_mounted(&self, path_or_device: &str) -> Result<bool> {
        let command = self.tools.program(Tool::Mount).to_string();
        let output = self.runner.run(&command)?;
        if !output.success() {
            return Err(RemountError::CommandFailed {
                command,
                code: output.code,
            });
        }

        let mounted = mount_table_contains(&output.stdout, path_or_device);
        debug!("{} mounted: {}", path_or_device, mounted);
        Ok(mounted)
    }
}
