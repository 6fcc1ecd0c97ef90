use std::io::Write;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use super::{first_arg, Command, CommandEnv, CommandError, Outcome};
use crate::core::state::ShellContext;

/// Local time in the classic `ctime` layout, e.g. `Thu Oct 16 08:25:00 2026`.
pub fn format_timestamp(time: Option<SystemTime>) -> String {
    match time {
        Some(time) => DateTime::<Local>::from(time)
            .format("%a %b %e %H:%M:%S %Y")
            .to_string(),
        None => "unknown".to_string(),
    }
}

#[derive(Clone, Default)]
pub struct InfoCommand;

impl InfoCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for InfoCommand {
    fn execute(
        &self,
        ctx: &mut ShellContext,
        env: &mut CommandEnv<'_>,
        args: &[&str],
    ) -> Result<Outcome, CommandError> {
        let target = first_arg(args, "info <file>")?;
        let path = ctx.resolve(target)?;
        let info = env
            .fs
            .metadata(&path)
            .map_err(|e| CommandError::fs("info", target, e))?;

        let header = format!("File info: {}", target);
        writeln!(env.out, "{}", env.highlighter.highlight_info(&header))?;
        writeln!(env.out, "  Size: {} bytes", info.size)?;
        writeln!(env.out, "  Permissions: {}", info.permissions())?;
        writeln!(
            env.out,
            "  Type: {}",
            if info.is_directory { "directory" } else { "file" }
        )?;
        writeln!(env.out, "  Last modified: {}", format_timestamp(info.modified))?;
        Ok(Outcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::Harness;
    use super::*;
    use crate::fs::FsError;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(None), "unknown");

        // one day after the epoch is 1970 in every time zone
        let stamp = format_timestamp(Some(UNIX_EPOCH + Duration::from_secs(86_400)));
        assert!(stamp.ends_with(" 1970"), "{}", stamp);
        assert!(stamp.contains("Jan"), "{}", stamp);
        assert_eq!(stamp.len(), "Fri Jan  2 00:00:00 1970".len());
    }

    #[test]
    fn test_info_reports_size_and_permissions() {
        let mut harness = Harness::new();
        harness.fs.write_file("/home/user/data.bin", [0u8; 42]).unwrap();

        let (result, output) = harness.run("info data.bin");
        assert!(result.is_ok());

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "File info: data.bin");
        assert_eq!(lines[1], "  Size: 42 bytes");
        assert_eq!(lines[2], "  Permissions: rw-r--r--");
        assert_eq!(lines[3], "  Type: file");
        assert!(lines[4].starts_with("  Last modified: "));
        assert_ne!(lines[4], "  Last modified: unknown");
    }

    #[test]
    fn test_info_directory() {
        let mut harness = Harness::new();
        harness.fs.create_dir_all("/home/user/dir").unwrap();
        let (_, output) = harness.run("info dir");
        assert!(output.contains("  Permissions: rwxr-xr-x\n"));
        assert!(output.contains("  Type: directory\n"));
    }

    #[test]
    fn test_info_missing() {
        let mut harness = Harness::new();
        let (result, output) = harness.run("info ghost");
        assert!(matches!(
            result,
            Err(CommandError::Fs {
                command: "info",
                source: FsError::NotFound,
                ..
            })
        ));
        assert!(output.is_empty());
    }
}
