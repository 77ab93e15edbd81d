// SPDX-License-Identifier: GPL-3.0-only

//! Domain types for re-mounting block devices with colliding UUIDs
//!
//! These types are shared between the orchestration core (`remount-sys`)
//! and the command-line driver (`remount-cli`):
//!
//! - `FilesystemType` → the closed set of filesystems the tool can handle
//! - `Tool` / `ToolSet` → the external programs the core invokes
//! - `MountRequest` → the immutable input of one run
//! - `MountSession` → the working state of one run, advanced stage by stage

pub mod filesystem;
pub mod request;
pub mod session;
pub mod tool;

pub use filesystem::FilesystemType;
pub use request::{MountContext, MountRequest};
pub use session::{MountSession, Stage};
pub use tool::{MountTool, Tool, ToolSet};
