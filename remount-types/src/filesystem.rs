// SPDX-License-Identifier: GPL-3.0-only

//! Supported filesystem types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tool::MountTool;

/// Filesystems whose UUID can be regenerated before mounting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilesystemType {
    /// ext2 filesystem
    Ext2,

    /// ext3 filesystem
    Ext3,

    /// ext4 filesystem
    Ext4,

    /// XFS filesystem
    Xfs,

    /// NTFS filesystem
    Ntfs,
}

impl FilesystemType {
    /// Probe order used when classifying a device. The first match wins.
    pub const DETECTION_ORDER: [FilesystemType; 5] = [
        FilesystemType::Ext2,
        FilesystemType::Ext3,
        FilesystemType::Ext4,
        FilesystemType::Xfs,
        FilesystemType::Ntfs,
    ];

    /// Token used both for probing and for display
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ext2 => "ext2",
            Self::Ext3 => "ext3",
            Self::Ext4 => "ext4",
            Self::Xfs => "xfs",
            Self::Ntfs => "ntfs",
        }
    }

    /// Tool used to mount a filesystem of this type
    pub fn mount_tool(&self) -> MountTool {
        match self {
            Self::Ext2 | Self::Ext3 | Self::Ext4 | Self::Xfs => MountTool::Mount,
            Self::Ntfs => MountTool::Ntfs3g,
        }
    }

    /// First type whose token appears in `text`, in [`Self::DETECTION_ORDER`].
    ///
    /// `text` is expected to be lower-cased already.
    pub fn first_in(text: &str) -> Option<Self> {
        Self::DETECTION_ORDER
            .into_iter()
            .find(|fs| text.contains(fs.as_str()))
    }
}

impl fmt::Display for FilesystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
