//! Non-interactive console for CI/headless environments.

use std::collections::HashMap;

use crate::error::{Result, ShellError};
use crate::logging::LogControl;

use super::theme::strip_tags;
use super::{parse_confirm, ConsoleIo, OutputMode, Prompt, PromptResult, PromptType};

/// Environment variable prefix for scripted prompt answers.
pub const PROMPT_ENV_PREFIX: &str = "TASKSHELL_PROMPT_";

/// Console implementation for non-interactive mode.
///
/// Tags are stripped from all output. Prompts never block: they are answered
/// from `TASKSHELL_PROMPT_<KEY>` environment variables or the prompt default.
pub struct NonInteractiveConsole {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
    log_control: Option<LogControl>,
}

impl NonInteractiveConsole {
    /// Create a new non-interactive console.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
            log_control: None,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
            log_control: None,
        }
    }

    /// Attach a log level handle.
    pub fn with_log_control(mut self, log_control: Option<LogControl>) -> Self {
        self.log_control = log_control;
        self
    }

    fn answer(prompt: &Prompt, value: &str) -> PromptResult {
        match prompt.prompt_type {
            PromptType::Confirm => PromptResult::Bool(parse_confirm(value)),
            _ => PromptResult::String(value.to_string()),
        }
    }
}

impl ConsoleIo for NonInteractiveConsole {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn set_loggers(&mut self, mode: OutputMode) {
        if let Some(control) = &self.log_control {
            control.apply(mode);
        }
    }

    fn write(&mut self, msg: &str, level: OutputMode) {
        if self.mode.shows(level) {
            println!("{}", strip_tags(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", strip_tags(msg));
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        if let Some(value) = self.env_overrides.get(&env_key) {
            return Ok(Self::answer(prompt, value));
        }

        if let Some(default) = &prompt.default {
            return Ok(Self::answer(prompt, default));
        }

        Err(ShellError::Prompt {
            message: format!(
                "Cannot prompt for '{}' in non-interactive mode (no default value)",
                prompt.key
            ),
        })
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
