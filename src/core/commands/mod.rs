use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use log::debug;

mod builtin;
mod cd;
mod files;
mod find;
mod info;
mod listing;

#[cfg(test)]
pub(crate) mod test_utils;

pub use builtin::{ClearCommand, ExitCommand, HelpCommand, PwdCommand};
pub use cd::CdCommand;
pub use files::{CatCommand, CpCommand, MkdirCommand, MvCommand, RmCommand};
pub use find::FindCommand;
pub use info::{format_timestamp, InfoCommand};
pub use listing::{format_entry, LsCommand};

use crate::core::parser::{parse_line, ParsedLine};
use crate::core::state::ShellContext;
use crate::fs::{CopyError, FileSystem, FsError};
use crate::highlight::SyntaxHighlighter;

#[derive(Debug)]
pub enum CommandError {
    NotFound(String),
    Usage(&'static str),
    HomeDirNotFound,
    Fs {
        command: &'static str,
        target: String,
        source: FsError,
    },
    Copy {
        src: String,
        dest: String,
        source: CopyError,
    },
    IoError(std::io::Error),
}

impl CommandError {
    pub fn fs(command: &'static str, target: &str, source: FsError) -> Self {
        CommandError::Fs {
            command,
            target: target.to_string(),
            source,
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::NotFound(cmd) => write!(f, "Unknown command: {}", cmd),
            CommandError::Usage(usage) => write!(f, "usage: {}", usage),
            CommandError::HomeDirNotFound => write!(f, "Home directory not found"),
            CommandError::Fs {
                command,
                target,
                source,
            } => write!(f, "{}: {}: {}", command, target, source),
            CommandError::Copy { src, dest, source } => {
                write!(f, "cp: {} -> {}: {}", src, dest, source)
            }
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

pub(crate) fn first_arg<'a>(args: &[&'a str], usage: &'static str) -> Result<&'a str, CommandError> {
    args.first().copied().ok_or(CommandError::Usage(usage))
}

pub(crate) fn two_args<'a>(args: &[&'a str], usage: &'static str) -> Result<(&'a str, &'a str), CommandError> {
    match args {
        &[first, second, ..] => Ok((first, second)),
        _ => Err(CommandError::Usage(usage)),
    }
}

/// What the loop should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// Everything a command may touch besides the working-directory context.
pub struct CommandEnv<'a> {
    pub fs: &'a dyn FileSystem,
    pub out: &'a mut dyn Write,
    pub highlighter: &'a SyntaxHighlighter,
}

impl<'a> CommandEnv<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        out: &'a mut dyn Write,
        highlighter: &'a SyntaxHighlighter,
    ) -> Self {
        Self {
            fs,
            out,
            highlighter,
        }
    }
}

pub trait Command {
    fn execute(
        &self,
        ctx: &mut ShellContext,
        env: &mut CommandEnv<'_>,
        args: &[&str],
    ) -> Result<Outcome, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Ls(LsCommand),
    Pwd(PwdCommand),
    Cd(CdCommand),
    Cat(CatCommand),
    Mkdir(MkdirCommand),
    Rm(RmCommand),
    Cp(CpCommand),
    Mv(MvCommand),
    Find(FindCommand),
    Info(InfoCommand),
    Clear(ClearCommand),
    Help(HelpCommand),
    Exit(ExitCommand),
}

impl Command for CommandType {
    fn execute(
        &self,
        ctx: &mut ShellContext,
        env: &mut CommandEnv<'_>,
        args: &[&str],
    ) -> Result<Outcome, CommandError> {
        match self {
            CommandType::Ls(cmd) => cmd.execute(ctx, env, args),
            CommandType::Pwd(cmd) => cmd.execute(ctx, env, args),
            CommandType::Cd(cmd) => cmd.execute(ctx, env, args),
            CommandType::Cat(cmd) => cmd.execute(ctx, env, args),
            CommandType::Mkdir(cmd) => cmd.execute(ctx, env, args),
            CommandType::Rm(cmd) => cmd.execute(ctx, env, args),
            CommandType::Cp(cmd) => cmd.execute(ctx, env, args),
            CommandType::Mv(cmd) => cmd.execute(ctx, env, args),
            CommandType::Find(cmd) => cmd.execute(ctx, env, args),
            CommandType::Info(cmd) => cmd.execute(ctx, env, args),
            CommandType::Clear(cmd) => cmd.execute(ctx, env, args),
            CommandType::Help(cmd) => cmd.execute(ctx, env, args),
            CommandType::Exit(cmd) => cmd.execute(ctx, env, args),
        }
    }
}

#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();

        commands.insert("ls", CommandType::Ls(LsCommand::new()));
        commands.insert("pwd", CommandType::Pwd(PwdCommand::new()));
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("cat", CommandType::Cat(CatCommand::new()));
        commands.insert("mkdir", CommandType::Mkdir(MkdirCommand::new()));
        commands.insert("rm", CommandType::Rm(RmCommand::new()));
        commands.insert("cp", CommandType::Cp(CpCommand::new()));
        commands.insert("mv", CommandType::Mv(MvCommand::new()));
        commands.insert("find", CommandType::Find(FindCommand::new()));
        commands.insert("info", CommandType::Info(InfoCommand::new()));
        commands.insert("clear", CommandType::Clear(ClearCommand::new()));
        commands.insert("help", CommandType::Help(HelpCommand::new()));
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));

        Self { commands }
    }

    /// Runs a command by name with already-split arguments.
    pub fn execute(
        &self,
        command: &str,
        ctx: &mut ShellContext,
        env: &mut CommandEnv<'_>,
        args: &[&str],
    ) -> Result<Outcome, CommandError> {
        match self.commands.get(command) {
            Some(cmd) => {
                debug!("dispatch {} with {} argument(s)", command, args.len());
                cmd.execute(ctx, env, args)
            }
            None => Err(CommandError::NotFound(command.to_string())),
        }
    }

    /// Parses one input line and runs it.
    pub fn execute_line(
        &self,
        line: &str,
        ctx: &mut ShellContext,
        env: &mut CommandEnv<'_>,
    ) -> Result<Outcome, CommandError> {
        match parse_line(line) {
            ParsedLine::Empty => Ok(Outcome::Continue),
            ParsedLine::Unknown(word) => Err(CommandError::NotFound(word.to_string())),
            ParsedLine::MissingArgs(spec) => Err(CommandError::Usage(spec.usage)),
            ParsedLine::Command { spec, args } => self.execute(spec.name, ctx, env, &args),
        }
    }
}
