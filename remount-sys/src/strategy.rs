// SPDX-License-Identifier: GPL-3.0-only

//! Per-filesystem UUID regeneration

use remount_types::{FilesystemType, MountRequest, Tool, ToolSet};
use tracing::{info, warn};
use uuid::Uuid;

use crate::blkid::query_device_uuid;
use crate::exec::CommandRunner;
use crate::mount::MountController;
use crate::{RemountError, Result};

/// Mount options for the XFS registration mount
const XFS_REGISTRATION_OPTIONS: &str = "-o rw,nouuid";

/// How a filesystem family gets a fresh on-disk UUID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UuidStrategy {
    /// ext2/ext3/ext4: `tune2fs -U random` on the unmounted device
    ExtFamily,
    /// XFS: nouuid registration mount, unmount, then `xfs_admin -U`
    Xfs,
    /// NTFS: nothing to do yet
    Ntfs,
}

impl UuidStrategy {
    pub fn for_filesystem(fs: FilesystemType) -> Self {
        match fs {
            FilesystemType::Ext2 | FilesystemType::Ext3 | FilesystemType::Ext4 => Self::ExtFamily,
            FilesystemType::Xfs => Self::Xfs,
            FilesystemType::Ntfs => Self::Ntfs,
        }
    }

    /// Give the device in `request` a new UUID.
    ///
    /// Returns the new UUID when it is known.
    pub fn regenerate<R: CommandRunner>(
        &self,
        runner: &R,
        tools: &ToolSet,
        request: &MountRequest,
    ) -> Result<Option<String>> {
        match self {
            Self::ExtFamily => regenerate_ext(runner, tools, &request.device).map(Some),
            Self::Xfs => regenerate_xfs(runner, tools, request).map(Some),
            Self::Ntfs => {
                info!("Keeping the NTFS UUID of {}", request.device);
                Ok(None)
            }
        }
    }
}

fn regenerate_ext<R: CommandRunner>(runner: &R, tools: &ToolSet, device: &str) -> Result<String> {
    let command = format!("{} -U random {}", tools.program(Tool::Tune2fs), device);
    info!("Randomizing ext UUID of {}", device);
    let output = runner.run(&command).map_err(|e| {
        warn!("{}", e);
        RemountError::UuidGenerationFailed(device.to_string())
    })?;
    if !output.success() {
        return Err(RemountError::UuidGenerationFailed(device.to_string()));
    }

    let uuid = query_device_uuid(runner, tools, device)?;
    info!("{} now has UUID {}", device, uuid);
    Ok(uuid)
}

fn regenerate_xfs<R: CommandRunner>(
    runner: &R,
    tools: &ToolSet,
    request: &MountRequest,
) -> Result<String> {
    let device = request.device.as_str();
    let uuid = Uuid::new_v4().to_string();

    // The nouuid mount/unmount pair must come before xfs_admin.
    let controller = MountController::new(runner, tools);
    controller.mount(
        FilesystemType::Xfs,
        device,
        &request.mount_path,
        XFS_REGISTRATION_OPTIONS,
    )?;
    controller.unmount(device)?;

    let command = format!("{} -U {} {}", tools.program(Tool::XfsAdmin), uuid, device);
    info!("Assigning XFS UUID {} to {}", uuid, device);
    let output = runner.run(&command).map_err(|e| {
        warn!("{}", e);
        RemountError::UuidGenerationFailed(device.to_string())
    })?;
    if !output.success() {
        return Err(RemountError::UuidGenerationFailed(device.to_string()));
    }

    Ok(uuid)
}
