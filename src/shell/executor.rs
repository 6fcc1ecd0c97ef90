use std::io::{self, Write};

use crate::core::commands::{CommandEnv, CommandError, Outcome};
use crate::error::ShellError;
use crate::highlight::SyntaxHighlighter;

const HELP_HINT: &str = "Type 'help' to see available commands.";

pub(crate) trait CommandHandler {
    fn execute_command(&mut self, command: &str) -> Result<Outcome, ShellError>;
}

impl CommandHandler for super::Shell {
    fn execute_command(&mut self, command: &str) -> Result<Outcome, ShellError> {
        if command.trim().is_empty() {
            return Ok(Outcome::Continue);
        }

        let before = self.context.current_dir().to_path_buf();

        let stdout = io::stdout();
        let mut out = stdout.lock();
        let result = {
            let mut env = CommandEnv::new(&self.fs, &mut out, &self.highlighter);
            self.executor
                .execute_line(command, &mut self.context, &mut env)
        };
        out.flush()?;

        if self.context.current_dir() != before {
            if let Some(helper) = self.editor.helper_mut() {
                helper.set_current_dir(self.context.current_dir().to_path_buf());
            }
        }

        match result {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                report_error(&self.highlighter, &e, &mut io::stderr().lock())?;
                Ok(Outcome::Continue)
            }
        }
    }
}

/// Prints a failed command in red; unknown commands also get the help hint.
pub(crate) fn report_error(
    highlighter: &SyntaxHighlighter,
    err: &CommandError,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(out, "{}", highlighter.highlight_error(&format!("Error: {}", err)))?;
    if let CommandError::NotFound(_) = err {
        writeln!(out, "{}", highlighter.highlight_hint(HELP_HINT))?;
    }
    Ok(())
}
