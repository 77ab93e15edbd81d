// SPDX-License-Identifier: GPL-3.0-only

//! uuid-remount: mount a block device whose filesystem UUID collides with
//! another volume (e.g. an LVM snapshot of a mounted volume).
//!
//! The device gets a fresh UUID (ext2/3/4 and XFS) before it is mounted.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, ensure};
use clap::Parser;
use remount_sys::{Remounter, SystemRunner};
use remount_types::{MountContext, MountRequest};
use tracing::{error, info};

mod config;
mod logging;
mod preflight;

use config::{Config, LoggingLevel};

/// Re-mount a device after regenerating its filesystem UUID
#[derive(Debug, Parser)]
#[command(name = "uuid-remount", version, long_about = None)]
struct Cli {
    /// Device file path
    #[arg(long)]
    dev: String,

    /// Mount path, an empty directory or a nonexistent path
    #[arg(long)]
    path: String,

    /// Reserved context, a JSON object
    #[arg(long, default_value = "{}")]
    ctx: String,

    /// Configuration file (defaults to $UUID_REMOUNT_CONFIG or /etc/uuid-remount/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level, overrides the configuration file
    #[arg(long, value_enum)]
    log_level: Option<LoggingLevel>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("uuid-remount: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    logging::init(cli.log_level.unwrap_or(config.log_level));

    match run(&cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("failed to mount: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: Config) -> anyhow::Result<()> {
    let mut request = build_request(cli)?;

    preflight::warn_if_not_root();
    preflight::report_missing_tools(&config.tools);
    let mount_path = preflight::prepare_mount_path(Path::new(&request.mount_path))?;
    request.mount_path = mount_path.to_string_lossy().into_owned();

    let mut remounter = Remounter::new(SystemRunner, config.tools, request);
    remounter.start().with_context(|| {
        let request = &remounter.session().request;
        format!("re-mounting {} at {}", request.device, request.mount_path)
    })?;

    if let Some(uuid) = &remounter.session().uuid {
        info!("New UUID: {}", uuid);
    }
    Ok(())
}

fn build_request(cli: &Cli) -> anyhow::Result<MountRequest> {
    ensure!(!cli.dev.trim().is_empty(), "--dev must not be empty");
    ensure!(!cli.path.trim().is_empty(), "--path must not be empty");

    let context = MountContext::from_json(&cli.ctx).context("--ctx must be a JSON object")?;
    Ok(MountRequest::new(
        preflight::resolve_device(cli.dev.trim()),
        cli.path.trim(),
        context,
    ))
}
