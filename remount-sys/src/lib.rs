// SPDX-License-Identifier: GPL-3.0-only

//! Re-mount block devices whose UUID collides with another volume
//!
//! The work is done by external filesystem utilities; this crate decides
//! which ones to run and in what order:
//! - Filesystem detection through a file-type probe
//! - Per-filesystem UUID regeneration (`tune2fs`, `xfs_admin`)
//! - Mounting, unmounting and mount-table queries
//! - The orchestration pipeline tying those together
//!
//! Every external program is reached through [`CommandRunner`], so the
//! whole pipeline can be driven by a scripted runner in tests.

pub mod blkid;
pub mod detect;
pub mod error;
pub mod exec;
pub mod mount;
pub mod orchestrator;
pub mod strategy;

#[cfg(test)]
pub(crate) mod testing;

pub use blkid::query_device_uuid;
pub use detect::detect_filesystem;
pub use error::{RemountError, Result};
pub use exec::{CommandOutput, CommandRunner, SystemRunner};
pub use mount::MountController;
pub use orchestrator::Remounter;
pub use strategy::UuidStrategy;
