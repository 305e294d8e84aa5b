//! Console input/output for shells.
//!
//! This module provides:
//! - [`ConsoleIo`] trait, the only way commands talk to the terminal
//! - [`TerminalConsole`] for interactive terminal usage
//! - [`NonInteractiveConsole`] for CI/headless environments
//! - [`MockConsole`] for tests
//! - Semantic output tags rendered by [`ShellTheme`]
//!
//! # Example
//!
//! ```
//! use taskshell::ui::{ConsoleIo, MockConsole, OutputMode};
//!
//! let mut io = MockConsole::new();
//! io.message("<info>Starting</info>");
//! io.verbose("hidden at normal level");
//! assert_eq!(io.output(), &["<info>Starting</info>".to_string()]);
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod terminal;
pub mod theme;

pub use mock::MockConsole;
pub use non_interactive::NonInteractiveConsole;
pub use output::OutputMode;
pub use prompts::prompt_user;
pub use terminal::{create_console, TerminalConsole};
pub use theme::{should_use_colors, strip_tags, ShellTheme};

use crate::error::Result;

/// Trait for console interactions.
///
/// Output written through [`ConsoleIo::write`] is filtered by the current
/// [`OutputMode`]. Errors are always shown.
pub trait ConsoleIo {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Align log output with the given mode.
    ///
    /// Consoles without a log handle ignore this.
    fn set_loggers(&mut self, _mode: OutputMode) {}

    /// Write a line to standard output if `level` is enabled.
    fn write(&mut self, msg: &str, level: OutputMode);

    /// Write a line to the error stream.
    fn error(&mut self, msg: &str);

    /// Show a prompt and get user input.
    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult>;

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;

    /// Write at normal level.
    fn message(&mut self, msg: &str) {
        self.write(msg, OutputMode::Normal);
    }

    /// Write at verbose level.
    fn verbose(&mut self, msg: &str) {
        self.write(msg, OutputMode::Verbose);
    }

    /// Write at quiet level (shown in every mode).
    fn quiet(&mut self, msg: &str) {
        self.write(msg, OutputMode::Quiet);
    }

    /// Write a success-tagged message.
    fn success(&mut self, msg: &str) {
        self.write(&format!("<success>{}</success>", msg), OutputMode::Normal);
    }

    /// Write a warning-tagged message.
    fn warning(&mut self, msg: &str) {
        self.write(&format!("<warning>{}</warning>", msg), OutputMode::Normal);
    }

    /// Write an info-tagged message.
    fn info(&mut self, msg: &str) {
        self.write(&format!("<info>{}</info>", msg), OutputMode::Normal);
    }
}

/// A prompt to show to the user.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Unique key for the prompt (used for scripted answers).
    pub key: String,
    /// The question to display.
    pub question: String,
    /// The type of prompt.
    pub prompt_type: PromptType,
    /// Default value if user just presses enter.
    pub default: Option<String>,
}

impl Prompt {
    /// Free-form input prompt.
    pub fn input(key: &str, question: &str, default: Option<&str>) -> Self {
        Self {
            key: key.to_string(),
            question: question.to_string(),
            prompt_type: PromptType::Input,
            default: default.map(String::from),
        }
    }

    /// Prompt restricted to a fixed set of answers.
    pub fn choice(key: &str, question: &str, options: &[&str], default: Option<&str>) -> Self {
        Self {
            key: key.to_string(),
            question: question.to_string(),
            prompt_type: PromptType::Choice {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
            default: default.map(String::from),
        }
    }

    /// Yes/no prompt.
    pub fn confirm(key: &str, question: &str, default: bool) -> Self {
        Self {
            key: key.to_string(),
            question: question.to_string(),
            prompt_type: PromptType::Confirm,
            default: Some(default.to_string()),
        }
    }
}

/// The type of prompt.
#[derive(Debug, Clone)]
pub enum PromptType {
    /// Yes/no confirmation.
    Confirm,
    /// Free-form text input.
    Input,
    /// Input that must be one of `options` (case-insensitive).
    Choice { options: Vec<String> },
}

/// Result of a prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptResult {
    /// Boolean result from confirm.
    Bool(bool),
    /// String result from input or choice.
    String(String),
}

impl PromptResult {
    /// Get as string.
    pub fn as_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::String(s) => s.clone(),
        }
    }

    /// Get as bool if this is a Bool result.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Interpret a textual answer as a confirmation.
pub(crate) fn parse_confirm(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "true" | "yes" | "y" | "1")
}
