use inksac::prelude::*;

use crate::core::parser;

/// Terminal colouring for everything the shell prints.
///
/// Falls back to plain text when the terminal reports no colour support.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    /// A highlighter that never emits escape sequences.
    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self.color_support, ColorSupport::NoColor)
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.is_plain() {
            return text.to_string();
        }
        text.style(style).to_string()
    }

    /// Colours the command word of `input` when it names a known command.
    pub fn highlight_command(&self, input: &str) -> String {
        if self.is_plain() {
            return input.to_string();
        }

        let trimmed = input.trim_start();
        let lead = &input[..input.len() - trimmed.len()];
        let word_end = trimmed.find(' ').unwrap_or(trimmed.len());
        let (word, rest) = trimmed.split_at(word_end);

        if !parser::is_command_name(word) {
            return input.to_string();
        }

        let command_style = Style::builder()
            .foreground(Color::Cyan)
            .bold()
            .build();

        format!("{}{}{}", lead, self.paint(word, command_style), rest)
    }

    pub fn highlight_error(&self, error: &str) -> String {
        let error_style = Style::builder()
            .foreground(Color::Red)
            .bold()
            .build();

        self.paint(error, error_style)
    }

    pub fn highlight_success(&self, message: &str) -> String {
        let success_style = Style::builder()
            .foreground(Color::Green)
            .build();

        self.paint(message, success_style)
    }

    pub fn highlight_directory(&self, name: &str) -> String {
        let dir_style = Style::builder()
            .foreground(Color::Blue)
            .bold()
            .build();

        self.paint(name, dir_style)
    }

    pub fn highlight_info(&self, header: &str) -> String {
        let info_style = Style::builder()
            .foreground(Color::Yellow)
            .bold()
            .build();

        self.paint(header, info_style)
    }

    pub fn highlight_prompt(&self, prompt: &str) -> String {
        let prompt_style = Style::builder()
            .foreground(Color::Blue)
            .build();

        self.paint(prompt, prompt_style)
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();

        self.paint(hint, hint_style)
    }
}
