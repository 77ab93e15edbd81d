// SPDX-License-Identifier: GPL-3.0-only

//! External programs invoked while re-mounting a device

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every external program the orchestration may run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    /// `file`, classifies the on-disk format of a device
    File,
    /// `blkid`, reports the UUID of a device
    Blkid,
    /// `mount`, generic mount tool and mount table listing
    Mount,
    /// `umount`
    Umount,
    /// `ntfs-3g`, NTFS-capable mount tool
    Ntfs3g,
    /// `tune2fs`, ext-family UUID randomization
    Tune2fs,
    /// `xfs_admin`, XFS UUID assignment
    XfsAdmin,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::File,
        Tool::Blkid,
        Tool::Mount,
        Tool::Umount,
        Tool::Ntfs3g,
        Tool::Tune2fs,
        Tool::XfsAdmin,
    ];

    /// Program name looked up on `PATH` when no override is configured
    pub fn default_program(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Blkid => "blkid",
            Self::Mount => "mount",
            Self::Umount => "umount",
            Self::Ntfs3g => "ntfs-3g",
            Self::Tune2fs => "tune2fs",
            Self::XfsAdmin => "xfs_admin",
        }
    }

    /// Package that usually ships the program
    pub fn package_hint(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Blkid | Self::Mount | Self::Umount => "util-linux",
            Self::Ntfs3g => "ntfs-3g",
            Self::Tune2fs => "e2fsprogs",
            Self::XfsAdmin => "xfsprogs",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_program())
    }
}

/// Tool used for the final mount of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MountTool {
    /// Generic `mount`, used for ext2/ext3/ext4/xfs
    Mount,
    /// `ntfs-3g`, used for ntfs
    Ntfs3g,
}

impl MountTool {
    pub fn tool(&self) -> Tool {
        match self {
            Self::Mount => Tool::Mount,
            Self::Ntfs3g => Tool::Ntfs3g,
        }
    }
}

/// Program names for each [`Tool`], with optional per-tool overrides.
///
/// Deserializes from a table such as:
///
/// ```toml
/// [tools]
/// ntfs-3g = "/usr/local/bin/ntfs-3g"
/// xfs_admin = "/sbin/xfs_admin"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolSet {
    pub file: Option<String>,
    pub blkid: Option<String>,
    pub mount: Option<String>,
    pub umount: Option<String>,
    #[serde(rename = "ntfs-3g")]
    pub ntfs3g: Option<String>,
    pub tune2fs: Option<String>,
    pub xfs_admin: Option<String>,
}

impl ToolSet {
    fn slot(&self, tool: Tool) -> &Option<String> {
        match tool {
            Tool::File => &self.file,
            Tool::Blkid => &self.blkid,
            Tool::Mount => &self.mount,
            Tool::Umount => &self.umount,
            Tool::Ntfs3g => &self.ntfs3g,
            Tool::Tune2fs => &self.tune2fs,
            Tool::XfsAdmin => &self.xfs_admin,
        }
    }

    /// Program to run for `tool`; falls back to [`Tool::default_program`]
    pub fn program(&self, tool: Tool) -> &str {
        self.slot(tool)
            .as_deref()
            .map(str::trim)
            .filter(|program| !program.is_empty())
            .unwrap_or(tool.default_program())
    }
}
