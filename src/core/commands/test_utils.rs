//! Shared fixtures for command tests.
//!
//! [`Harness`] runs input lines against an in-memory filesystem and captures
//! everything written to the output stream.

use super::{CommandEnv, CommandError, CommandExecutor, Outcome};
use crate::core::state::ShellContext;
use crate::fs::MemoryFileSystem;
use crate::highlight::SyntaxHighlighter;

pub(crate) const HOME: &str = "/home/user";

pub(crate) struct Harness {
    pub fs: MemoryFileSystem,
    pub ctx: ShellContext,
    pub executor: CommandExecutor,
    highlighter: SyntaxHighlighter,
}

impl Harness {
    /// An empty `/home/user` as the working directory.
    pub fn new() -> Self {
        let fs = MemoryFileSystem::new();
        fs.create_dir_all(HOME).unwrap();
        Self {
            fs,
            ctx: ShellContext::new(HOME),
            executor: CommandExecutor::new(),
            highlighter: SyntaxHighlighter::plain(),
        }
    }

    pub fn run(&mut self, line: &str) -> (Result<Outcome, CommandError>, String) {
        let mut out = Vec::new();
        let result = {
            let mut env = CommandEnv::new(&self.fs, &mut out, &self.highlighter);
            self.executor.execute_line(line, &mut self.ctx, &mut env)
        };
        (result, String::from_utf8_lossy(&out).into_owned())
    }
}
