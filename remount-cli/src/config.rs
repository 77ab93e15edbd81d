// SPDX-License-Identifier: GPL-3.0-only

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::ValueEnum;
use remount_types::ToolSet;
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "UUID_REMOUNT_CONFIG";
pub const SYSTEM_CONFIG_PATH: &str = "/etc/uuid-remount/config.toml";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LoggingLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub log_level: LoggingLevel,
    pub tools: ToolSet,
}

impl Config {
    /// Load the configuration file, if any.
    ///
    /// An explicitly requested file (flag or environment) must exist; the
    /// system-wide file is optional.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let env = std::env::var_os(CONFIG_ENV);
        match resolve_path(explicit, env, Path::new(SYSTEM_CONFIG_PATH)) {
            Some(path) => Self::read(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

fn resolve_path(
    explicit: Option<&Path>,
    env: Option<OsString>,
    system: &Path,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Some(path) = env.filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }

    system.is_file().then(|| system.to_path_buf())
}
