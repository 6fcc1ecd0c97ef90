use std::io::{self, Write};
use std::path::Path;

use crate::core::commands::format_entry;
use crate::fs::FileSystem;
use crate::highlight::SyntaxHighlighter;

/// `--list` mode: prints one listing of `dir` and reports whether it could be opened.
pub fn list_once(
    fs: &dyn FileSystem,
    dir: &str,
    highlighter: &SyntaxHighlighter,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<bool> {
    let entries = match fs.list_directory(Path::new(dir)) {
        Ok(entries) => entries,
        Err(e) => {
            writeln!(
                err,
                "{}",
                highlighter.highlight_error(&format!("Error opening directory '{}': {}", dir, e))
            )?;
            return Ok(false);
        }
    };

    writeln!(out, "{}", highlighter.highlight_info(&format!("Listing: {}", dir)))?;
    for entry in &entries {
        writeln!(out, "{}", format_entry(entry, highlighter))?;
    }
    out.flush()?;
    Ok(true)
}
