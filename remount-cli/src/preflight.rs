// SPDX-License-Identifier: GPL-3.0-only

//! Checks run before any device is touched

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use remount_types::{Tool, ToolSet};
use tracing::{debug, warn};

/// Make sure `path` is an empty directory, creating it when it does not exist.
///
/// Returns the canonical path, which is how the mount table will list it.
pub(crate) fn prepare_mount_path(path: &Path) -> anyhow::Result<PathBuf> {
    if !path.exists() {
        debug!("Creating mount path {}", path.display());
        fs::create_dir_all(path)
            .with_context(|| format!("creating mount path {}", path.display()))?;
    }

    if !path.is_dir() {
        bail!("mount path {} is not a directory", path.display());
    }

    let mut entries = fs::read_dir(path)
        .with_context(|| format!("reading mount path {}", path.display()))?;
    if entries.next().is_some() {
        bail!("mount path {} is not empty", path.display());
    }

    fs::canonicalize(path).with_context(|| format!("resolving mount path {}", path.display()))
}

/// Resolve symlinks in a device path; unresolvable paths are kept as given
pub(crate) fn resolve_device(device: &str) -> String {
    fs::canonicalize(device)
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|_| device.to_string())
}

/// Tools whose configured program cannot be found
pub(crate) fn missing_tools(tools: &ToolSet) -> Vec<Tool> {
    Tool::ALL
        .into_iter()
        .filter(|tool| which::which(tools.program(*tool)).is_err())
        .collect()
}

pub(crate) fn report_missing_tools(tools: &ToolSet) {
    for tool in missing_tools(tools) {
        warn!(
            "`{}` not found (usually provided by {})",
            tools.program(tool),
            tool.package_hint()
        );
    }
}

pub(crate) fn warn_if_not_root() {
    if unsafe { libc::geteuid() } != 0 {
        warn!("Not running as root; mount and UUID changes will probably fail");
    }
}
