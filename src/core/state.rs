use std::path::{Path, PathBuf};

use crate::core::commands::CommandError;
use crate::path::PathExpander;

/// The working directory the shell resolves relative paths against.
///
/// Only `cd` replaces it; the process working directory is never consulted
/// once the shell is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellContext {
    current_dir: PathBuf,
}

impl ShellContext {
    pub fn new(current_dir: impl Into<PathBuf>) -> Self {
        Self {
            current_dir: current_dir.into(),
        }
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Turns a command argument into a path anchored at the working directory.
    pub fn resolve(&self, arg: &str) -> Result<PathBuf, CommandError> {
        PathExpander::new()
            .resolve(&self.current_dir, arg)
            .map_err(|_| CommandError::HomeDirNotFound)
    }

    pub fn set_current_dir(&mut self, dir: PathBuf) {
        self.current_dir = dir;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_and_absolute() {
        let ctx = ShellContext::new("/srv/data");
        assert_eq!(ctx.resolve("a.txt").unwrap(), PathBuf::from("/srv/data/a.txt"));
        assert_eq!(ctx.resolve("/tmp/x").unwrap(), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_set_current_dir() {
        let mut ctx = ShellContext::new("/");
        ctx.set_current_dir(PathBuf::from("/usr"));
        assert_eq!(ctx.current_dir(), Path::new("/usr"));
        assert_eq!(ctx.resolve("bin").unwrap(), PathBuf::from("/usr/bin"));
    }
}
