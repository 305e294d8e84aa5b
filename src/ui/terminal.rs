//! Interactive terminal console.

use console::Term;
use std::io::Write;

use crate::error::Result;
use crate::logging::LogControl;

use super::{
    prompt_user, should_use_colors, ConsoleIo, NonInteractiveConsole, OutputMode, Prompt,
    PromptResult, ShellTheme,
};

/// Interactive terminal console implementation.
pub struct TerminalConsole {
    out: Term,
    err: Term,
    theme: ShellTheme,
    mode: OutputMode,
    log_control: Option<LogControl>,
}

impl TerminalConsole {
    /// Create a new terminal console.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            ShellTheme::new()
        } else {
            ShellTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
            log_control: None,
        }
    }

    /// Attach a log level handle.
    pub fn with_log_control(mut self, log_control: Option<LogControl>) -> Self {
        self.log_control = log_control;
        self
    }
}

impl ConsoleIo for TerminalConsole {
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
            writeln!(self.out, "{}", self.theme.render(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.render(msg)).ok();
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        prompt_user(prompt, &self.out)
    }

    fn is_interactive(&self) -> bool {
        self.out.is_term()
    }
}

/// Create the appropriate console for the environment.
pub fn create_console(
    interactive: bool,
    mode: OutputMode,
    log_control: Option<LogControl>,
) -> Box<dyn ConsoleIo> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalConsole::new(mode).with_log_control(log_control))
    } else {
        Box::new(NonInteractiveConsole::new(mode).with_log_control(log_control))
    }
}
