// SPDX-License-Identifier: GPL-3.0-only

use remount_types::Stage;
use thiserror::Error;

/// Error types for re-mount operations
///
/// Every variant is terminal for the current run.
#[derive(Error, Debug)]
pub enum RemountError {
    #[error("unsupported file system type: {0}")]
    UnsupportedFilesystem(String),

    #[error("unknown file system type on {0}")]
    UnknownFilesystem(String),

    #[error("failed to query the UUID of {0}")]
    DeviceUuidQueryFailed(String),

    #[error("failed to generate a new UUID for {0}")]
    UuidGenerationFailed(String),

    #[error("failed to unmount {0}")]
    UnmountFailed(String),

    #[error("failed to mount {device} at {mount_path}")]
    MountFailed { device: String, mount_path: String },

    #[error("`{command}` exited with status {code}")]
    CommandFailed { command: String, code: i32 },

    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("empty command line")]
    EmptyCommand,

    #[error("stage {found} cannot run before {expected}")]
    StageOrder { expected: Stage, found: Stage },
}

/// Result type alias for re-mount operations
pub type Result<T> = std::result::Result<T, RemountError>;
