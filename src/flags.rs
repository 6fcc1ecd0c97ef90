use crate::error::ShellError;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: HashMap<String, Flag>,
    positional: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: String,
    pub long: String,
    pub description: String,
    pub value: Option<String>,
}

impl Flag {
    fn new(short: &str, long: &str, description: &str) -> Self {
        Flag {
            short: short.to_string(),
            long: long.to_string(),
            description: description.to_string(),
            value: None,
        }
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = HashMap::new();

        flags.insert(
            "help".to_string(),
            Flag::new("-h", "--help", "Print this help message"),
        );
        flags.insert(
            "version".to_string(),
            Flag::new("-v", "--version", "Show version information"),
        );
        flags.insert(
            "quiet".to_string(),
            Flag::new("-q", "--quiet", "Suppress the banner and key notices"),
        );
        flags.insert(
            "debug".to_string(),
            Flag::new("-d", "--debug", "Enable debug logging"),
        );
        flags.insert(
            "list".to_string(),
            Flag::new("-l", "--list", "List DIR once and exit"),
        );

        Flags {
            flags,
            positional: None,
        }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        for arg in args {
            if arg.len() > 1 && arg.starts_with('-') {
                let flag = self
                    .flags
                    .values_mut()
                    .find(|flag| arg == &flag.short || arg == &flag.long)
                    .ok_or_else(|| ShellError::FlagError(format!("Unknown flag {}", arg)))?;
                flag.value = Some("true".to_string());
            } else if self.positional.is_none() {
                self.positional = Some(arg.clone());
            } else {
                return Err(ShellError::FlagError(format!(
                    "Unexpected argument {}",
                    arg
                )));
            }
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .and_then(|f| f.value.as_ref())
            .is_some()
    }

    /// The optional `DIR` argument.
    pub fn positional(&self) -> Option<&str> {
        self.positional.as_deref()
    }

    pub fn print_help(&self) {
        println!("Usage: scout [OPTIONS] [DIR]");
        println!("\nOptions:");

        let mut flags: Vec<&Flag> = self.flags.values().collect();
        flags.sort_by(|a, b| a.long.cmp(&b.long));
        for flag in flags {
            println!("  {}, {:<15} {}", flag.short, flag.long, flag.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_short_and_long_flags() {
        let mut flags = Flags::new();
        flags.parse(&args(&["-q", "--debug"])).unwrap();
        assert!(flags.is_set("quiet"));
        assert!(flags.is_set("debug"));
        assert!(!flags.is_set("list"));
    }

    #[test]
    fn test_positional_directory() {
        let mut flags = Flags::new();
        flags.parse(&args(&["--list", "/tmp"])).unwrap();
        assert!(flags.is_set("list"));
        assert_eq!(flags.positional(), Some("/tmp"));

        let mut flags = Flags::default();
        flags.parse(&[]).unwrap();
        assert_eq!(flags.positional(), None);
    }

    #[test]
    fn test_rejects_unknown_and_extra() {
        let mut flags = Flags::new();
        assert!(matches!(
            flags.parse(&args(&["--frob"])),
            Err(ShellError::FlagError(_))
        ));

        let mut flags = Flags::new();
        assert!(matches!(
            flags.parse(&args(&["a", "b"])),
            Err(ShellError::FlagError(_))
        ));
    }

    #[test]
    fn test_lone_dash_is_positional() {
        let mut flags = Flags::new();
        flags.parse(&args(&["-"])).unwrap();
        assert_eq!(flags.positional(), Some("-"));
    }
}
