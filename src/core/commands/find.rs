use std::io::Write;

use log::debug;

use super::{first_arg, Command, CommandEnv, CommandError, Outcome};
use crate::core::state::ShellContext;
use crate::fs;

#[derive(Clone, Default)]
pub struct FindCommand;

impl FindCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for FindCommand {
    fn execute(
        &self,
        ctx: &mut ShellContext,
        env: &mut CommandEnv<'_>,
        args: &[&str],
    ) -> Result<Outcome, CommandError> {
        let pattern = first_arg(args, "find <pattern>")?;
        let base = ctx.current_dir();

        let report = fs::find(env.fs, base, pattern)
            .map_err(|e| CommandError::fs("find", &base.to_string_lossy(), e))?;

        for path in &report.matches {
            writeln!(env.out, "{}", path.display())?;
        }
        if !report.skipped.is_empty() {
            debug!(
                "find {:?}: {} subtree(s) not searched",
                pattern,
                report.skipped.len()
            );
        }
        Ok(Outcome::Continue)
    }
}
