// SPDX-License-Identifier: GPL-3.0-only

//! Detection → UUID regeneration → mount → verification pipeline

use remount_types::{MountRequest, MountSession, Stage, ToolSet};
use tracing::{debug, info};

use crate::detect::detect_filesystem;
use crate::exec::CommandRunner;
use crate::mount::MountController;
use crate::strategy::UuidStrategy;
use crate::{RemountError, Result};

/// Drives one re-mount run.
///
/// Stages run strictly in [`Stage`] order. The first failure stops the run
/// and is returned unchanged; completed stages are not rolled back.
#[derive(Debug)]
pub struct Remounter<R> {
    runner: R,
    tools: ToolSet,
    session: MountSession,
}

impl<R: CommandRunner> Remounter<R> {
    pub fn new(runner: R, tools: ToolSet, request: MountRequest) -> Self {
        Self {
            runner,
            tools,
            session: MountSession::new(request),
        }
    }

    pub fn session(&self) -> &MountSession {
        &self.session
    }

    pub fn into_session(self) -> MountSession {
        self.session
    }

    /// Run every remaining stage
    pub fn start(&mut self) -> Result<()> {
        info!(
            "Re-mounting {} at {}",
            self.session.request.device, self.session.request.mount_path
        );
        if !self.session.request.context.is_empty() {
            debug!(
                "Ignoring reserved context keys: {:?}",
                self.session.request.context.keys().collect::<Vec<_>>()
            );
        }

        self.bind_args()?;
        self.change_dev_uuid()?;
        self.mount_device()?;
        self.check()?;

        info!(
            "{} is mounted at {}",
            self.session.request.device, self.session.request.mount_path
        );
        Ok(())
    }

    /// Resolve the filesystem type and the tool that will mount it
    pub fn bind_args(&mut self) -> Result<()> {
        self.enter(Stage::BindArgs)?;

        let fs = detect_filesystem(&self.runner, &self.tools, &self.session.request.device)?;
        let tool = fs.mount_tool();
        debug!("{} will be mounted with {:?}", fs, tool);

        self.session.filesystem = Some(fs);
        self.session.mount_tool = Some(tool);
        self.session.advance();
        Ok(())
    }

    /// Give the device a UUID that no longer collides
    pub fn change_dev_uuid(&mut self) -> Result<()> {
        self.enter(Stage::ChangeDevUuid)?;

        let fs = self
            .session
            .filesystem
            .ok_or_else(|| RemountError::UnsupportedFilesystem("unresolved".to_string()))?;
        let strategy = UuidStrategy::for_filesystem(fs);
        debug!("Using {:?} UUID strategy", strategy);

        if let Some(uuid) = strategy.regenerate(&self.runner, &self.tools, &self.session.request)? {
            self.session.uuid = Some(uuid);
        }
        self.session.advance();
        Ok(())
    }

    /// Plain mount of the device at the target path
    pub fn mount_device(&mut self) -> Result<()> {
        self.enter(Stage::MountDevice)?;

        let fs = self
            .session
            .filesystem
            .ok_or_else(|| RemountError::UnsupportedFilesystem("unresolved".to_string()))?;
        let request = &self.session.request;
        MountController::new(&self.runner, &self.tools).mount(
            fs,
            &request.device,
            &request.mount_path,
            "",
        )?;

        self.session.advance();
        Ok(())
    }

    /// Succeeds when the device or the target path is in the mount table
    pub fn check(&mut self) -> Result<()> {
        self.enter(Stage::Check)?;

        let request = &self.session.request;
        let controller = MountController::new(&self.runner, &self.tools);
        if !controller.is_mounted(&request.device)? && !controller.is_mounted(&request.mount_path)? {
            return Err(RemountError::MountFailed {
                device: request.device.clone(),
                mount_path: request.mount_path.clone(),
            });
        }

        self.session.advance();
        Ok(())
    }

    fn enter(&self, stage: Stage) -> Result<()> {
        if self.session.stage != stage {
            return Err(RemountError::StageOrder {
                expected: self.session.stage,
                found: stage,
            });
        }
        info!("Stage {}", stage);
        Ok(())
    }
}
