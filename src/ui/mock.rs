//! Mock console implementation for testing.
//!
//! `MockConsole` implements the `ConsoleIo` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use taskshell::ui::{ConsoleIo, MockConsole, Prompt};
//!
//! let mut io = MockConsole::new();
//! io.set_prompt_response("overwrite", "y");
//!
//! let answer = io.prompt(&Prompt::choice("overwrite", "Overwrite?", &["y", "n"], Some("n"))).unwrap();
//! assert_eq!(answer.as_string(), "y");
//! assert_eq!(io.prompts_shown(), &["overwrite".to_string()]);
//! ```

use std::collections::{HashMap, VecDeque};

use crate::error::Result;

use super::{parse_confirm, ConsoleIo, OutputMode, Prompt, PromptResult, PromptType};

/// Mock console implementation for testing.
///
/// Captures output that passes the level filter, every error line, and the
/// sequence of output-mode and logger changes. Supports single responses
/// (via `set_prompt_response`) and queued responses (via
/// `queue_prompt_responses`) for keys asked multiple times.
#[derive(Debug, Default)]
pub struct MockConsole {
    mode: OutputMode,
    interactive: bool,
    output: Vec<String>,
    errors: Vec<String>,
    mode_changes: Vec<OutputMode>,
    logger_changes: Vec<OutputMode>,
    prompt_responses: HashMap<String, String>,
    prompt_queues: HashMap<String, VecDeque<String>>,
    prompts_shown: Vec<String>,
}

impl MockConsole {
    /// Create a new interactive MockConsole with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            interactive: true,
            ..Default::default()
        }
    }

    /// Create a new MockConsole with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            interactive: true,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Queue multiple responses for the same prompt key.
    ///
    /// Responses are returned in order. After the queue is exhausted,
    /// falls back to `set_prompt_response` or defaults.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.prompt_queues.insert(key.to_string(), queue);
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Lines written to standard output.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Lines written to the error stream.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Every mode passed to `set_output_mode`, in order.
    pub fn mode_changes(&self) -> &[OutputMode] {
        &self.mode_changes
    }

    /// Every mode passed to `set_loggers`, in order.
    pub fn logger_changes(&self) -> &[OutputMode] {
        &self.logger_changes
    }

    /// Prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if any output line contains `msg`.
    pub fn has_output(&self, msg: &str) -> bool {
        self.output.iter().any(|m| m.contains(msg))
    }

    /// Check if any error line contains `msg`.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Clear all captured interactions.
    pub fn clear(&mut self) {
        self.output.clear();
        self.errors.clear();
        self.mode_changes.clear();
        self.logger_changes.clear();
        self.prompts_shown.clear();
    }

    fn answer(prompt: &Prompt, response: String) -> PromptResult {
        match prompt.prompt_type {
            PromptType::Confirm => PromptResult::Bool(parse_confirm(&response)),
            _ => PromptResult::String(response),
        }
    }
}

impl ConsoleIo for MockConsole {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode_changes.push(mode);
        self.mode = mode;
    }

    fn set_loggers(&mut self, mode: OutputMode) {
        self.logger_changes.push(mode);
    }

    fn write(&mut self, msg: &str, level: OutputMode) {
        if self.mode.shows(level) {
            self.output.push(msg.to_string());
        }
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        if let Some(queue) = self.prompt_queues.get_mut(&prompt.key) {
            if let Some(response) = queue.pop_front() {
                return Ok(Self::answer(prompt, response));
            }
        }

        if let Some(response) = self.prompt_responses.get(&prompt.key) {
            return Ok(Self::answer(prompt, response.clone()));
        }

        if let Some(default) = &prompt.default {
            return Ok(Self::answer(prompt, default.clone()));
        }

        Ok(Self::answer(prompt, String::new()))
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}
