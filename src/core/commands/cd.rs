use log::debug;

use super::{first_arg, Command, CommandEnv, CommandError, Outcome};
use crate::core::state::ShellContext;

#[derive(Clone, Default)]
pub struct CdCommand;

impl CdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CdCommand {
    fn execute(
        &self,
        ctx: &mut ShellContext,
        env: &mut CommandEnv<'_>,
        args: &[&str],
    ) -> Result<Outcome, CommandError> {
        let target = first_arg(args, "cd <dir>")?;
        let path = ctx.resolve(target)?;

        // canonical form, so `pwd` reports where we actually are
        let resolved = env
            .fs
            .resolve_dir(&path)
            .map_err(|e| CommandError::fs("cd", target, e))?;

        debug!("cd {} -> {}", target, resolved.display());
        ctx.set_current_dir(resolved);
        Ok(Outcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::Harness;
    use super::*;
    use crate::fs::FsError;
    use std::path::Path;

    #[test]
    fn test_cd_relative_and_back() {
        let mut harness = Harness::new();
        harness.fs.create_dir_all("/home/user/docs").unwrap();

        harness.run("cd docs").0.unwrap();
        assert_eq!(harness.ctx.current_dir(), Path::new("/home/user/docs"));

        harness.run("cd ..").0.unwrap();
        assert_eq!(harness.ctx.current_dir(), Path::new("/home/user"));
    }

    #[test]
    fn test_cd_parent_at_root_stays_at_root() {
        let mut harness = Harness::new();
        harness.run("cd /").0.unwrap();
        harness.run("cd ..").0.unwrap();

        let (_, output) = harness.run("pwd");
        assert_eq!(output, "/\n");
    }

    #[test]
    fn test_cd_invalid_keeps_directory() {
        let mut harness = Harness::new();
        harness.fs.write_file("/home/user/file.txt", "x").unwrap();

        let (result, _) = harness.run("cd /nonexistent/path");
        assert!(matches!(
            result,
            Err(CommandError::Fs {
                command: "cd",
                source: FsError::NotFound,
                ..
            })
        ));

        let (result, _) = harness.run("cd file.txt");
        assert!(matches!(
            result,
            Err(CommandError::Fs {
                source: FsError::NotADirectory,
                ..
            })
        ));
        assert_eq!(harness.ctx.current_dir(), Path::new("/home/user"));
    }

    #[test]
    fn test_cd_requires_target() {
        let mut harness = Harness::new();
        let (result, _) = harness.run("cd");
        assert!(matches!(result, Err(CommandError::Usage("cd <dir>"))));
        assert_eq!(harness.ctx.current_dir(), Path::new("/home/user"));
    }

    #[test]
    fn test_cd_real_directory() {
        use crate::fs::OsFileSystem;
        use crate::highlight::SyntaxHighlighter;

        let temp_dir = std::env::temp_dir();
        let canonical = std::fs::canonicalize(&temp_dir).unwrap();
        let fs = OsFileSystem::new();
        let highlighter = SyntaxHighlighter::plain();
        let mut out = Vec::new();
        let mut env = CommandEnv::new(&fs, &mut out, &highlighter);
        let mut ctx = ShellContext::new("/");

        let target = temp_dir.to_string_lossy().into_owned();
        CdCommand::new().execute(&mut ctx, &mut env, &[target.as_str()]).unwrap();
        assert_eq!(ctx.current_dir(), canonical.as_path());
    }
}
