//! The fixed command grammar.
//!
//! Commands are tried in table order. A command without arguments must match
//! the whole line; a command with arguments matches `<name>`, one whitespace
//! character, then `rest`. One-argument commands take `rest` verbatim and
//! two-argument commands split it at the first whitespace character.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Zero,
    ZeroOrOne,
    One,
    Two,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub arity: Arity,
    pub usage: &'static str,
    pub summary: &'static str,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "ls",
        arity: Arity::ZeroOrOne,
        usage: "ls [dir]",
        summary: "List directory contents",
    },
    CommandSpec {
        name: "pwd",
        arity: Arity::Zero,
        usage: "pwd",
        summary: "Print the working directory",
    },
    CommandSpec {
        name: "cd",
        arity: Arity::One,
        usage: "cd <dir>",
        summary: "Change the working directory",
    },
    CommandSpec {
        name: "cat",
        arity: Arity::One,
        usage: "cat <file>",
        summary: "Print a file",
    },
    CommandSpec {
        name: "mkdir",
        arity: Arity::One,
        usage: "mkdir <dirname>",
        summary: "Create a directory",
    },
    CommandSpec {
        name: "rm",
        arity: Arity::One,
        usage: "rm <file>",
        summary: "Remove a file",
    },
    CommandSpec {
        name: "cp",
        arity: Arity::Two,
        usage: "cp <src> <dest>",
        summary: "Copy a file",
    },
    CommandSpec {
        name: "mv",
        arity: Arity::Two,
        usage: "mv <old> <new>",
        summary: "Move or rename a file",
    },
    CommandSpec {
        name: "find",
        arity: Arity::One,
        usage: "find <pattern>",
        summary: "Search below the working directory by name",
    },
    CommandSpec {
        name: "info",
        arity: Arity::One,
        usage: "info <file>",
        summary: "Show size, permissions and modification time",
    },
    CommandSpec {
        name: "clear",
        arity: Arity::Zero,
        usage: "clear",
        summary: "Clear the screen",
    },
    CommandSpec {
        name: "help",
        arity: Arity::Zero,
        usage: "help",
        summary: "Show this help",
    },
    CommandSpec {
        name: "exit",
        arity: Arity::Zero,
        usage: "exit",
        summary: "Leave the shell",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine<'a> {
    Empty,
    Command {
        spec: &'static CommandSpec,
        args: Vec<&'a str>,
    },
    MissingArgs(&'static CommandSpec),
    Unknown(&'a str),
}

pub fn is_command_name(word: &str) -> bool {
    COMMANDS.iter().any(|spec| spec.name == word)
}

pub fn parse_line(line: &str) -> ParsedLine<'_> {
    let line = line.trim();
    if line.is_empty() {
        return ParsedLine::Empty;
    }

    for spec in COMMANDS {
        if line == spec.name {
            return match spec.arity {
                Arity::Zero | Arity::ZeroOrOne => ParsedLine::Command {
                    spec,
                    args: Vec::new(),
                },
                Arity::One | Arity::Two => ParsedLine::MissingArgs(spec),
            };
        }

        let Some(rest) = line
            .strip_prefix(spec.name)
            .and_then(|r| r.strip_prefix(|c: char| c.is_ascii_whitespace()))
        else {
            continue;
        };
        let rest = rest.trim_start();

        match spec.arity {
            Arity::Zero => {}
            Arity::ZeroOrOne | Arity::One => {
                return ParsedLine::Command {
                    spec,
                    args: vec![rest],
                }
            }
            Arity::Two => {
                return match rest.split_once(|c: char| c.is_ascii_whitespace()) {
                    Some((first, second)) if !second.trim_start().is_empty() => {
                        ParsedLine::Command {
                            spec,
                            args: vec![first, second.trim_start()],
                        }
                    }
                    _ => ParsedLine::MissingArgs(spec),
                }
            }
        }
    }

    let word = line.split_whitespace().next().unwrap_or(line);
    ParsedLine::Unknown(word)
}
