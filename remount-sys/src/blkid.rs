// SPDX-License-Identifier: GPL-3.0-only

//! Device UUID lookup through `blkid`

use remount_types::{Tool, ToolSet};
use tracing::{debug, warn};

use crate::exec::CommandRunner;
use crate::{RemountError, Result};

/// Extract the `UUID="..."` value from `blkid` output.
///
/// Only a token whose key is exactly `UUID` counts, so `PARTUUID` and
/// `UUID_SUB` are skipped. The key is matched case-insensitively; the value
/// is returned as printed.
pub fn parse_uuid(output: &str) -> Option<String> {
    output
        .split_whitespace()
        .filter_map(|token| token.split_once('='))
        .find(|(key, _)| key.eq_ignore_ascii_case("uuid"))
        .and_then(|(_, value)| value.strip_prefix('"')?.strip_suffix('"'))
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

/// Current UUID of `device`
pub fn query_device_uuid<R: CommandRunner>(
    runner: &R,
    tools: &ToolSet,
    device: &str,
) -> Result<String> {
    let command = format!("{} {}", tools.program(Tool::Blkid), device);
    let output = runner.run(&command).map_err(|e| {
        warn!("UUID query for {} failed: {}", device, e);
        RemountError::DeviceUuidQueryFailed(device.to_string())
    })?;

    if !output.success() {
        return Err(RemountError::DeviceUuidQueryFailed(device.to_string()));
    }

    let uuid = parse_uuid(&output.stdout)
        .ok_or_else(|| RemountError::DeviceUuidQueryFailed(device.to_string()))?;
    debug!("{} has UUID {}", device, uuid);
    Ok(uuid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRunner;

    #[test]
    fn parses_uuid_token() {
        let output = r#"/dev/sdb1: UUID="1234-ABCD" BLOCK_SIZE="4096" TYPE="ext4" PARTUUID="9f2e-01""#;
        assert_eq!(parse_uuid(output).as_deref(), Some("1234-ABCD"));
    }

    #[test]
    fn ignores_partuuid_and_uuid_sub() {
        let output = r#"/dev/sdb1: PARTUUID="9f2e-01" UUID_SUB="aaaa" TYPE="xfs""#;
        assert_eq!(parse_uuid(output), None);

        let output = r#"/dev/sdb1: PARTUUID="9f2e-01" UUID="5c3b" TYPE="xfs""#;
        assert_eq!(parse_uuid(output).as_deref(), Some("5c3b"));
    }

    #[test]
    fn empty_or_unquoted_uuid_is_not_parsable() {
        assert_eq!(parse_uuid(r#"/dev/sdb1: UUID="" TYPE="ext4""#), None);
        assert_eq!(parse_uuid("/dev/sdb1: UUID=1234 TYPE=ext4"), None);
        assert_eq!(parse_uuid(""), None);
    }

    #[test]
    fn lowercase_key_is_accepted() {
        assert_eq!(
            parse_uuid(r#"/dev/sdb1: uuid="0f5e""#).as_deref(),
            Some("0f5e")
        );
    }

    #[test]
    fn query_reports_failures_as_uuid_query_errors() {
        let tools = ToolSet::default();

        let failing = ScriptedRunner::new().reply("blkid /dev/sdb1", 2, "");
        assert!(matches!(
            query_device_uuid(&failing, &tools, "/dev/sdb1"),
            Err(RemountError::DeviceUuidQueryFailed(_))
        ));

        let garbage = ScriptedRunner::new().reply("blkid /dev/sdb1", 0, "/dev/sdb1: TYPE=\"ext4\"");
        assert!(matches!(
            query_device_uuid(&garbage, &tools, "/dev/sdb1"),
            Err(RemountError::DeviceUuidQueryFailed(_))
        ));

        let missing = ScriptedRunner::new().unlaunchable("blkid");
        assert!(matches!(
            query_device_uuid(&missing, &tools, "/dev/sdb1"),
            Err(RemountError::DeviceUuidQueryFailed(_))
        ));
    }
}
