use std::env;
use std::path::PathBuf;

use log::{debug, warn};
use rustyline::{
    error::ReadlineError,
    history::{FileHistory, History},
    Editor,
};

mod executor;
mod oneshot;

pub use oneshot::list_once;

use crate::{
    core::{
        commands::{CommandExecutor, Outcome},
        state::ShellContext,
    },
    error::ShellError,
    flags::Flags,
    fs::{FileSystem, OsFileSystem},
    highlight::SyntaxHighlighter,
    input::ShellCompleter,
    path::PathExpander,
};

use executor::CommandHandler;

pub struct Shell {
    pub(crate) editor: Editor<ShellCompleter, FileHistory>,
    pub(crate) context: ShellContext,
    pub(crate) fs: OsFileSystem,
    pub(crate) highlighter: SyntaxHighlighter,
    pub(crate) flags: Flags,
    pub(crate) executor: CommandExecutor,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let fs = OsFileSystem::new();
        let current_dir = start_directory(&fs, flags.positional())?;
        let highlighter = SyntaxHighlighter::new();

        let completer = ShellCompleter::new(current_dir.clone(), highlighter);
        let mut editor = Editor::<ShellCompleter, FileHistory>::new()?;
        editor.set_helper(Some(completer));

        Ok(Shell {
            editor,
            context: ShellContext::new(current_dir),
            fs,
            highlighter,
            flags,
            executor: CommandExecutor::new(),
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        let quiet = self.flags.is_set("quiet");
        if !quiet {
            self.print_banner();
        }

        loop {
            self.refresh_current_dir()?;

            let prompt = format!("{} > ", self.context.current_dir().display());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    record_history(self.editor.history_mut(), &line);
                    if self.execute_command(&line)? == Outcome::Exit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    if !quiet {
                        println!("CTRL-C");
                    }
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    if !quiet {
                        println!("CTRL-D");
                    }
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// The working directory may have been removed or renamed behind our back.
    fn refresh_current_dir(&mut self) -> Result<(), ShellError> {
        let resolved = self
            .fs
            .resolve_dir(self.context.current_dir())
            .map_err(ShellError::WorkingDirectory)?;

        if resolved != self.context.current_dir() {
            debug!("working directory now {}", resolved.display());
            self.context.set_current_dir(resolved.clone());
            if let Some(helper) = self.editor.helper_mut() {
                helper.set_current_dir(resolved);
            }
        }
        Ok(())
    }

    fn print_banner(&self) {
        println!(
            "{}",
            self.highlighter
                .highlight_info(&format!("scout {}", env!("CARGO_PKG_VERSION")))
        );
        println!(
            "{}",
            self.highlighter
                .highlight_hint("Type 'help' to see available commands.")
        );
    }
}

/// Adds a non-blank line to the session history, which is never saved.
fn record_history<H: History>(history: &mut H, line: &str) -> bool {
    if line.trim().is_empty() {
        return false;
    }
    match history.add(line) {
        Ok(added) => added,
        Err(e) => {
            warn!("couldn't add to history: {}", e);
            false
        }
    }
}

fn start_directory(fs: &dyn FileSystem, requested: Option<&str>) -> Result<PathBuf, ShellError> {
    let process_dir = env::current_dir()?;
    let start = match requested {
        Some(dir) => PathExpander::new().resolve(&process_dir, dir)?,
        None => process_dir,
    };
    fs.resolve_dir(&start).map_err(ShellError::WorkingDirectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{FsError, MemoryFileSystem};
    use rustyline::history::MemHistory;
    use std::path::Path;

    #[test]
    fn test_record_history_skips_blank_lines() {
        let mut history = MemHistory::new();

        assert!(record_history(&mut history, "ls"));
        assert!(!record_history(&mut history, "   "));
        assert!(record_history(&mut history, "cd /tmp"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_start_directory_uses_positional() {
        let fs = MemoryFileSystem::new();
        fs.create_dir_all("/srv/data").unwrap();

        assert_eq!(
            start_directory(&fs, Some("/srv/data/../data")).unwrap(),
            Path::new("/srv/data")
        );
    }

    #[test]
    fn test_start_directory_rejects_missing() {
        let fs = MemoryFileSystem::new();
        assert!(matches!(
            start_directory(&fs, Some("/nowhere")),
            Err(ShellError::WorkingDirectory(FsError::NotFound))
        ));
    }
}
