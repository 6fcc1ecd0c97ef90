use rustyline::completion::Pair;

use crate::core::parser::{Arity, COMMANDS};

#[derive(Debug, Clone, Copy, Default)]
pub struct CommandCompleter;

impl CommandCompleter {
    pub fn new() -> Self {
        Self
    }

    pub fn complete_command(&self, line: &str) -> Vec<Pair> {
        let input = line.trim();
        let mut matches: Vec<Pair> = COMMANDS
            .iter()
            .filter(|spec| spec.name.starts_with(input))
            .map(|spec| {
                // commands that take arguments get the separating space
                let replacement = match spec.arity {
                    Arity::Zero => spec.name.to_string(),
                    _ => format!("{} ", spec.name),
                };
                Pair {
                    display: spec.name.to_string(),
                    replacement,
                }
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}
