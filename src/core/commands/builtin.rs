use std::io::Write;

use super::{Command, CommandEnv, CommandError, Outcome};
use crate::core::parser::COMMANDS;
use crate::core::state::ShellContext;

/// ANSI: erase display, cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[1;1H";

#[derive(Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(
        &self,
        _ctx: &mut ShellContext,
        _env: &mut CommandEnv<'_>,
        _args: &[&str],
    ) -> Result<Outcome, CommandError> {
        Ok(Outcome::Exit)
    }
}

#[derive(Clone, Default)]
pub struct PwdCommand;

impl PwdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PwdCommand {
    fn execute(
        &self,
        ctx: &mut ShellContext,
        env: &mut CommandEnv<'_>,
        _args: &[&str],
    ) -> Result<Outcome, CommandError> {
        writeln!(env.out, "{}", ctx.current_dir().display())?;
        Ok(Outcome::Continue)
    }
}

#[derive(Clone, Default)]
pub struct ClearCommand;

impl ClearCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ClearCommand {
    fn execute(
        &self,
        _ctx: &mut ShellContext,
        env: &mut CommandEnv<'_>,
        _args: &[&str],
    ) -> Result<Outcome, CommandError> {
        write!(env.out, "{}", CLEAR_SCREEN)?;
        env.out.flush()?;
        Ok(Outcome::Continue)
    }
}

#[derive(Clone, Default)]
pub struct HelpCommand;

impl HelpCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for HelpCommand {
    fn execute(
        &self,
        _ctx: &mut ShellContext,
        env: &mut CommandEnv<'_>,
        _args: &[&str],
    ) -> Result<Outcome, CommandError> {
        writeln!(env.out, "{}", env.highlighter.highlight_info("Available commands:"))?;
        for spec in COMMANDS {
            writeln!(env.out, "  {:<18} {}", spec.usage, spec.summary)?;
        }
        Ok(Outcome::Continue)
    }
}
