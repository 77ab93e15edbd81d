// SPDX-License-Identifier: GPL-3.0-only

//! Working state of one re-mount run

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::filesystem::FilesystemType;
use crate::request::MountRequest;
use crate::tool::MountTool;

/// Orchestration stages, in the only order they may run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    /// Resolve the filesystem type and the mount tool
    BindArgs,
    /// Regenerate the on-disk UUID
    ChangeDevUuid,
    /// Mount the device at the target path
    MountDevice,
    /// Verify the mount is visible
    Check,
    /// All stages completed
    Done,
}

impl Stage {
    pub fn next(self) -> Self {
        match self {
            Self::BindArgs => Self::ChangeDevUuid,
            Self::ChangeDevUuid => Self::MountDevice,
            Self::MountDevice => Self::Check,
            Self::Check | Self::Done => Self::Done,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BindArgs => "bind-args",
            Self::ChangeDevUuid => "change-dev-uuid",
            Self::MountDevice => "mount-device",
            Self::Check => "check",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Mutable state owned by a single orchestration run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountSession {
    pub request: MountRequest,

    /// Resolved during [`Stage::BindArgs`]
    pub filesystem: Option<FilesystemType>,

    /// Resolved during [`Stage::BindArgs`]
    pub mount_tool: Option<MountTool>,

    /// UUID assigned to the device, once known
    pub uuid: Option<String>,

    /// Next stage to run
    pub stage: Stage,
}

impl MountSession {
    pub fn new(request: MountRequest) -> Self {
        Self {
            request,
            filesystem: None,
            mount_tool: None,
            uuid: None,
            stage: Stage::BindArgs,
        }
    }

    pub fn advance(&mut self) {
        self.stage = self.stage.next();
    }

    pub fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }
}
