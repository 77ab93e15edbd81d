// SPDX-License-Identifier: GPL-3.0-only

//! Input of one re-mount run

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved context forwarded from the command line.
///
/// Always a JSON object. Its keys carry no meaning yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MountContext(Map<String, Value>);

impl MountContext {
    /// Parse the raw `--ctx` value. Anything but a JSON object is rejected.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Device to re-mount and where to mount it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountRequest {
    /// Block device path (e.g. `/dev/vg_test/xfs_lv_snap`)
    pub device: String,

    /// Target mount path, an empty directory
    pub mount_path: String,

    /// Reserved context
    pub context: MountContext,
}

impl MountRequest {
    pub fn new(
        device: impl Into<String>,
        mount_path: impl Into<String>,
        context: MountContext,
    ) -> Self {
        Self {
            device: device.into(),
            mount_path: mount_path.into(),
            context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_is_empty_object() {
        let context = MountContext::from_json("{}").expect("empty object parses");
        assert!(context.is_empty());
    }

    #[test]
    fn context_keeps_unknown_keys() {
        let context = MountContext::from_json(r#"{"owner": "ops", "ticket": 12}"#)
            .expect("object parses");
        let mut keys: Vec<_> = context.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["owner", "ticket"]);
    }

    #[test]
    fn context_rejects_non_objects() {
        assert!(MountContext::from_json("[]").is_err());
        assert!(MountContext::from_json("\"text\"").is_err());
        assert!(MountContext::from_json("{").is_err());
    }
}
