use colored::{ColoredString, Colorize};
use is_terminal::IsTerminal;
use std::env;
use std::io::stdout;

/// Color mode configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Auto, // Use TTY detection
    Always,
    Never,
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(format!(
                "Invalid color mode: '{}'. Valid options: auto, always, never",
                s
            )),
        }
    }
}

/// TTY-aware color helper that respects NO_COLOR and terminal detection
///
/// Only labels are decorated. With colors off every method returns the text
/// unchanged, so the printed report is byte-for-byte the plain format.
#[derive(Debug, Clone)]
pub struct ColorHelper {
    mode: ColorMode,
    stdout_is_terminal: bool,
    no_color: bool,
}

impl ColorHelper {
    /// Create a new color helper with the specified mode
    pub fn new(mode: ColorMode) -> Self {
        Self {
            mode,
            stdout_is_terminal: stdout().is_terminal(),
            no_color: env::var("NO_COLOR").is_ok_and(|value| !value.is_empty()),
        }
    }

    /// Helper that never emits escape codes, whatever the environment says
    pub fn plain() -> Self {
        Self {
            mode: ColorMode::Never,
            stdout_is_terminal: false,
            no_color: true,
        }
    }

    /// Check if colors should be used for stdout
    pub fn should_color_stdout(&self) -> bool {
        // Respect NO_COLOR environment variable (standard)
        if self.no_color {
            return false;
        }

        match self.mode {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => self.stdout_is_terminal,
        }
    }

    fn paint(&self, text: &str, style: impl FnOnce(&str) -> ColoredString) -> ColoredString {
        if self.should_color_stdout() {
            style(text)
        } else {
            text.normal()
        }
    }

    /// Label for failure lines
    pub fn error_label(&self, text: &str) -> ColoredString {
        self.paint(text, |t| t.red().bold())
    }

    /// Label introducing a section of the report
    pub fn heading(&self, text: &str) -> ColoredString {
        self.paint(text, |t| t.cyan().bold())
    }

    pub fn bold(&self, text: &str) -> ColoredString {
        self.paint(text, |t| t.bold())
    }

    pub fn warning(&self, text: &str) -> ColoredString {
        self.paint(text, |t| t.yellow())
    }
}
