use std::io::{BufRead, Write};
use std::path::Path;

use log::debug;

use super::{first_arg, two_args, Command, CommandEnv, CommandError, Outcome};
use crate::core::state::ShellContext;

#[derive(Clone, Default)]
pub struct CatCommand;

impl CatCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CatCommand {
    fn execute(
        &self,
        ctx: &mut ShellContext,
        env: &mut CommandEnv<'_>,
        args: &[&str],
    ) -> Result<Outcome, CommandError> {
        let target = first_arg(args, "cat <file>")?;
        let path = ctx.resolve(target)?;
        let mut reader = env
            .fs
            .open_read(&path)
            .map_err(|e| CommandError::fs("cat", target, e))?;

        // byte lines, so non-UTF-8 content passes through untouched
        let mut line = Vec::new();
        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .map_err(|e| CommandError::fs("cat", target, e.into()))?;
            if read == 0 {
                break;
            }
            if line.last() != Some(&b'\n') {
                line.push(b'\n');
            }
            env.out.write_all(&line)?;
        }
        Ok(Outcome::Continue)
    }
}

#[derive(Clone, Default)]
pub struct MkdirCommand;

impl MkdirCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for MkdirCommand {
    fn execute(
        &self,
        ctx: &mut ShellContext,
        env: &mut CommandEnv<'_>,
        args: &[&str],
    ) -> Result<Outcome, CommandError> {
        let name = first_arg(args, "mkdir <dirname>")?;
        let path = ctx.resolve(name)?;
        env.fs
            .create_dir(&path)
            .map_err(|e| CommandError::fs("mkdir", name, e))?;

        let message = format!("Directory created: {}", name);
        writeln!(env.out, "{}", env.highlighter.highlight_success(&message))?;
        Ok(Outcome::Continue)
    }
}

#[derive(Clone, Default)]
pub struct RmCommand;

impl RmCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for RmCommand {
    fn execute(
        &self,
        ctx: &mut ShellContext,
        env: &mut CommandEnv<'_>,
        args: &[&str],
    ) -> Result<Outcome, CommandError> {
        let target = first_arg(args, "rm <file>")?;
        let path = ctx.resolve(target)?;
        env.fs
            .remove_file(&path)
            .map_err(|e| CommandError::fs("rm", target, e))?;

        let message = format!("Removed: {}", target);
        writeln!(env.out, "{}", env.highlighter.highlight_success(&message))?;
        Ok(Outcome::Continue)
    }
}

#[derive(Clone, Default)]
pub struct CpCommand;

impl CpCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CpCommand {
    fn execute(
        &self,
        ctx: &mut ShellContext,
        env: &mut CommandEnv<'_>,
        args: &[&str],
    ) -> Result<Outcome, CommandError> {
        let (src, dest) = two_args(args, "cp <src> <dest>")?;
        let src_path = ctx.resolve(src)?;
        let dest_path = ctx.resolve(dest)?;

        let copied = env
            .fs
            .copy_file(&src_path, &dest_path)
            .map_err(|e| CommandError::Copy {
                src: src.to_string(),
                dest: dest.to_string(),
                source: e,
            })?;

        let message = format!("Copied {} -> {} ({} bytes)", src, dest, copied);
        writeln!(env.out, "{}", env.highlighter.highlight_success(&message))?;
        Ok(Outcome::Continue)
    }
}

#[derive(Clone, Default)]
pub struct MvCommand;

impl MvCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for MvCommand {
    fn execute(
        &self,
        ctx: &mut ShellContext,
        env: &mut CommandEnv<'_>,
        args: &[&str],
    ) -> Result<Outcome, CommandError> {
        let (old, new) = two_args(args, "mv <old> <new>")?;
        let old_path = ctx.resolve(old)?;
        let new_path = ctx.resolve(new)?;

        // only directories can hold the working directory
        let moved_dir = env.fs.resolve_dir(&old_path).ok();

        env.fs
            .rename(&old_path, &new_path)
            .map_err(|e| CommandError::fs("mv", old, e))?;

        if let Some(moved_dir) = moved_dir {
            follow_rename(ctx, env, &moved_dir, &new_path);
        }

        let message = format!("Moved {} -> {}", old, new);
        writeln!(env.out, "{}", env.highlighter.highlight_success(&message))?;
        Ok(Outcome::Continue)
    }
}

/// Re-anchors the working directory when it was `moved_dir` or lay inside it.
fn follow_rename(ctx: &mut ShellContext, env: &CommandEnv<'_>, moved_dir: &Path, new_path: &Path) {
    let Ok(rest) = ctx.current_dir().strip_prefix(moved_dir) else {
        return;
    };
    let rest = rest.to_path_buf();

    match env.fs.resolve_dir(new_path) {
        Ok(new_dir) => {
            // joining an empty suffix would add a trailing slash
            let current = if rest.as_os_str().is_empty() {
                new_dir
            } else {
                new_dir.join(rest)
            };
            debug!("working directory moved to {}", current.display());
            ctx.set_current_dir(current);
        }
        Err(e) => debug!("renamed directory not found at {}: {}", new_path.display(), e),
    }
}
