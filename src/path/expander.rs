use crate::error::ShellError;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub struct PathExpander;

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    pub fn expand(&self, path: &str) -> Result<PathBuf, ShellError> {
        if path.starts_with('~') {
            self.expand_tilde(path)
        } else {
            Ok(Path::new(path).to_path_buf())
        }
    }

    /// Expands `path` and anchors it at `cwd` unless it is already absolute.
    pub fn resolve(&self, cwd: &Path, path: &str) -> Result<PathBuf, ShellError> {
        let expanded = self.expand(path)?;
        if expanded.is_absolute() {
            Ok(expanded)
        } else {
            Ok(cwd.join(expanded))
        }
    }

    fn expand_tilde(&self, path: &str) -> Result<PathBuf, ShellError> {
        if path.len() == 1 {
            return self.get_home_dir();
        }

        match path[1..].strip_prefix('/') {
            Some(stripped) => {
                let mut home_path = self.get_home_dir()?;
                for part in stripped.split('/').filter(|p| !p.is_empty()) {
                    home_path.push(part);
                }
                Ok(home_path)
            }
            // "~user" is taken literally
            None => Ok(Path::new(path).to_path_buf()),
        }
    }

    pub fn get_home_dir(&self) -> Result<PathBuf, ShellError> {
        dirs::home_dir().ok_or(ShellError::HomeDirNotFound)
    }
}
