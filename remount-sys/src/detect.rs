// SPDX-License-Identifier: GPL-3.0-only

//! Filesystem classification through `file -bsL`

use remount_types::{FilesystemType, Tool, ToolSet};
use tracing::{debug, info};

use crate::exec::CommandRunner;
use crate::{RemountError, Result};

/// Classify `device` as one of the supported filesystem types.
///
/// The probe runs in brief mode so the device path never reaches the matcher.
/// The description is lower-cased and searched for each type's token in
/// [`FilesystemType::DETECTION_ORDER`]; the first match wins.
pub fn detect_filesystem<R: CommandRunner>(
    runner: &R,
    tools: &ToolSet,
    device: &str,
) -> Result<FilesystemType> {
    let command = format!("{} -bsL {}", tools.program(Tool::File), device);
    let output = runner.run(&command)?;
    if !output.success() {
        return Err(RemountError::CommandFailed {
            command,
            code: output.code,
        });
    }

    let description = description_of(&output.stdout, device).to_lowercase();
    debug!("Probe of {}: {}", device, description);

    match FilesystemType::first_in(&description) {
        Some(fs) => {
            info!("Detected {} on {}", fs, device);
            Ok(fs)
        }
        None => Err(RemountError::UnknownFilesystem(device.to_string())),
    }
}

/// Drop a leading `<device>:` left by `file` replacements that ignore `-b`
fn description_of<'a>(stdout: &'a str, device: &str) -> &'a str {
    let stdout = stdout.trim_start();
    stdout
        .strip_prefix(device)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRunner;

    fn detect(stdout: &str) -> Result<FilesystemType> {
        let runner = ScriptedRunner::new().reply("file -bsL /dev/sdb1", 0, stdout);
        detect_filesystem(&runner, &ToolSet::default(), "/dev/sdb1")
    }

    #[test]
    fn classifies_each_single_token_output() {
        let cases = [
            (
                "/dev/sdb1: Linux rev 1.0 ext2 filesystem data, UUID=0b1e",
                FilesystemType::Ext2,
            ),
            (
                "/dev/sdb1: Linux rev 1.0 ext3 filesystem data (needs journal recovery)",
                FilesystemType::Ext3,
            ),
            (
                "/dev/sdb1: Linux rev 1.0 EXT4 filesystem data, UUID=1234 (extents)",
                FilesystemType::Ext4,
            ),
            ("/dev/sdb1: SGI XFS filesystem data (blksz 4096)", FilesystemType::Xfs),
            (
                "/dev/sdb1: DOS/MBR boot sector, OEM-ID \"NTFS    \"",
                FilesystemType::Ntfs,
            ),
        ];

        for (stdout, expected) in cases {
            assert_eq!(detect(stdout).expect("known type"), expected, "{stdout}");
        }
    }

    #[test]
    fn unknown_output_is_unknown_filesystem() {
        let error = detect("/dev/sdb1: BTRFS Filesystem sectorsize 4096").expect_err("no token");
        assert!(matches!(error, RemountError::UnknownFilesystem(device) if device == "/dev/sdb1"));
    }

    #[test]
    fn probe_failure_is_distinct_from_unknown() {
        let runner = ScriptedRunner::new().reply("file -bsL /dev/sdb1", 1, "");
        let error = detect_filesystem(&runner, &ToolSet::default(), "/dev/sdb1")
            .expect_err("probe failed");
        assert!(matches!(error, RemountError::CommandFailed { code: 1, .. }));
    }

    #[test]
    fn launch_failure_is_surfaced() {
        let runner = ScriptedRunner::new().unlaunchable("file");
        let error = detect_filesystem(&runner, &ToolSet::default(), "/dev/sdb1")
            .expect_err("file missing");
        assert!(matches!(error, RemountError::Spawn { .. }));
    }

    #[test]
    fn uses_configured_program() {
        let tools = ToolSet {
            file: Some("/usr/local/bin/file".to_string()),
            ..ToolSet::default()
        };
        let runner = ScriptedRunner::new().reply("/usr/local/bin/file -bsL /dev/sdb1", 0, "xfs");
        assert_eq!(
            detect_filesystem(&runner, &tools, "/dev/sdb1").expect("xfs"),
            FilesystemType::Xfs
        );
    }

    #[test]
    fn device_path_tokens_do_not_decide_the_type() {
        let runner = ScriptedRunner::new().reply(
            "file -bsL /dev/vg_test/ext2_snap",
            0,
            "SGI XFS filesystem data (blksz 4096, inosz 512, v2 dirs)",
        );
        assert_eq!(
            detect_filesystem(&runner, &ToolSet::default(), "/dev/vg_test/ext2_snap")
                .expect("xfs"),
            FilesystemType::Xfs
        );

        let runner = ScriptedRunner::new().reply(
            "file -bsL /dev/vg_test/ext2_snap",
            0,
            "/dev/vg_test/ext2_snap: SGI XFS filesystem data (blksz 4096)",
        );
        assert_eq!(
            detect_filesystem(&runner, &ToolSet::default(), "/dev/vg_test/ext2_snap")
                .expect("xfs"),
            FilesystemType::Xfs
        );
    }

    #[test]
    fn unknown_description_ignores_device_path() {
        let runner = ScriptedRunner::new().reply("file -bsL /dev/vg_test/xfs_lv_snap", 0, "data");
        assert!(matches!(
            detect_filesystem(&runner, &ToolSet::default(), "/dev/vg_test/xfs_lv_snap"),
            Err(RemountError::UnknownFilesystem(_))
        ));
    }
}
