use std::io::Write;

use super::{Command, CommandEnv, CommandError, Outcome};
use crate::core::state::ShellContext;
use crate::fs::DirectoryEntry;
use crate::highlight::SyntaxHighlighter;

/// One listing line: `[DIR]  name`, or an indented file name with its size.
pub fn format_entry(entry: &DirectoryEntry, highlighter: &SyntaxHighlighter) -> String {
    if entry.is_directory {
        return format!("[DIR]  {}", highlighter.highlight_directory(&entry.name));
    }

    match entry.size {
        Some(size) => format!("       {} ({} bytes)", entry.name, size),
        None => format!("       {} (size N/A)", entry.name),
    }
}

#[derive(Clone, Default)]
pub struct LsCommand;

impl LsCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for LsCommand {
    fn execute(
        &self,
        ctx: &mut ShellContext,
        env: &mut CommandEnv<'_>,
        args: &[&str],
    ) -> Result<Outcome, CommandError> {
        let target = args.first().copied().unwrap_or(".");
        let path = ctx.resolve(target)?;

        // the whole listing or nothing
        let entries = env
            .fs
            .list_directory(&path)
            .map_err(|e| CommandError::fs("ls", target, e))?;

        for entry in &entries {
            writeln!(env.out, "{}", format_entry(entry, env.highlighter))?;
        }
        Ok(Outcome::Continue)
    }
}
