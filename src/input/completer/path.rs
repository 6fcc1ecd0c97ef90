use std::{
    fs,
    path::{Path, PathBuf},
};

use rustyline::completion::Pair;

use crate::path::PathExpander;

/// Completes file names relative to the shell's working directory.
#[derive(Debug, Clone)]
pub struct PathCompleter {
    base_dir: PathBuf,
}

impl PathCompleter {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn set_base_dir(&mut self, base_dir: PathBuf) {
        self.base_dir = base_dir;
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (typed_dir, file_prefix) = split_input(incomplete);
        let dir_to_search = self.search_dir(typed_dir);

        self.get_path_matches(&dir_to_search, typed_dir, file_prefix)
    }

    fn search_dir(&self, typed_dir: &str) -> PathBuf {
        if typed_dir.is_empty() {
            return self.base_dir.clone();
        }
        PathExpander::new()
            .resolve(&self.base_dir, typed_dir)
            .unwrap_or_else(|_| self.base_dir.join(typed_dir))
    }

    fn get_path_matches(&self, dir_to_search: &Path, typed_dir: &str, file_prefix: &str) -> Vec<Pair> {
        let mut matches = Vec::new();

        if let Ok(entries) = fs::read_dir(dir_to_search) {
            for entry in entries.filter_map(Result::ok) {
                if let Some(name) = entry.file_name().to_str() {
                    if name.starts_with(file_prefix) {
                        matches.push(create_completion_pair(name, &entry.path(), typed_dir));
                    }
                }
            }
        }

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

/// Splits `dir/part` into the typed directory (with its trailing slash) and
/// the file-name prefix.
fn split_input(incomplete: &str) -> (&str, &str) {
    match incomplete.rfind('/') {
        Some(pos) => incomplete.split_at(pos + 1),
        None => ("", incomplete),
    }
}

fn create_completion_pair(name: &str, path: &Path, typed_dir: &str) -> Pair {
    let relative_path = format!("{}{}", typed_dir, name);

    if path.is_dir() {
        Pair {
            display: format!("{}/", name),
            replacement: format!("{}/", relative_path),
        }
    } else {
        Pair {
            display: name.to_string(),
            replacement: relative_path,
        }
    }
}
