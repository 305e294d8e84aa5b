//! Helpers available to a command while one of its handlers runs.

use std::fs;
use std::path::Path;

use crate::error::{Result, ShellError, StopSignal};
use crate::options::{OptionParser, ParamValue, Params};
use crate::ui::{ConsoleIo, Prompt};

use super::{CommandResult, Shell, ShellState};

/// Width of the rule printed by [`ShellContext::hr`].
const RULE_WIDTH: usize = 63;

/// A running shell's state paired with the console it writes to.
pub struct ShellContext<'a> {
    state: &'a mut ShellState,
    io: &'a mut dyn ConsoleIo,
}

impl<'a> ShellContext<'a> {
    pub fn new(state: &'a mut ShellState, io: &'a mut dyn ConsoleIo) -> Self {
        Self { state, io }
    }

    /// Underlying console.
    pub fn io(&mut self) -> &mut dyn ConsoleIo {
        &mut *self.io
    }

    pub fn state(&self) -> &ShellState {
        self.state
    }

    pub fn state_mut(&mut self) -> &mut ShellState {
        self.state
    }

    /// Name of the running shell.
    pub fn name(&self) -> &str {
        &self.state.name
    }

    /// Resolved command name, e.g. `build` or `main`.
    pub fn command(&self) -> Option<&str> {
        self.state.command.as_deref()
    }

    pub fn params(&self) -> &Params {
        &self.state.params
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.state.params.get(name)
    }

    pub fn args(&self) -> &[String] {
        &self.state.args
    }

    /// Parser used for the current run.
    pub fn parser(&self) -> Option<&OptionParser> {
        self.state.parser.as_ref()
    }

    pub fn is_interactive(&self) -> bool {
        self.state.interactive
    }

    pub fn out(&mut self, msg: &str) {
        self.io.message(msg);
    }

    pub fn verbose(&mut self, msg: &str) {
        self.io.verbose(msg);
    }

    pub fn quiet(&mut self, msg: &str) {
        self.io.quiet(msg);
    }

    pub fn err(&mut self, msg: &str) {
        self.io.error(msg);
    }

    pub fn info(&mut self, msg: &str) {
        self.io.info(msg);
    }

    pub fn warn(&mut self, msg: &str) {
        self.io.error(&format!("<warning>{}</warning>", msg));
    }

    pub fn success(&mut self, msg: &str) {
        self.io.success(msg);
    }

    /// Blank line.
    pub fn nl(&mut self) {
        self.io.message("");
    }

    /// Horizontal rule.
    pub fn hr(&mut self) {
        self.io.message(&"-".repeat(RULE_WIDTH));
    }

    /// Banner printed by the default `welcome` hook.
    pub fn welcome_banner(&mut self) {
        let banner = format!(
            "<info>Welcome to {} v{}</info>",
            self.state.root_name,
            env!("CARGO_PKG_VERSION")
        );
        self.nl();
        self.out(&banner);
        self.hr();
    }

    /// Ask a free-form question. Non-interactive shells get `default`.
    pub fn ask(&mut self, question: &str, default: &str) -> Result<String> {
        if !self.state.interactive {
            return Ok(default.to_string());
        }
        let prompt = Prompt::input(&prompt_key(question), question, Some(default));
        Ok(self.io.prompt(&prompt)?.as_string())
    }

    /// Ask for one of `options`. Non-interactive shells get `default`.
    pub fn ask_choice(&mut self, question: &str, options: &[&str], default: &str) -> Result<String> {
        if !self.state.interactive {
            return Ok(default.to_string());
        }
        let prompt = Prompt::choice(&prompt_key(question), question, options, Some(default));
        Ok(self.io.prompt(&prompt)?.as_string().to_lowercase())
    }

    /// Yes/no question. Non-interactive shells get `default`.
    pub fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        if !self.state.interactive {
            return Ok(default);
        }
        let prompt = Prompt::confirm(&prompt_key(question), question, default);
        let answer = self.io.prompt(&prompt)?;
        Ok(answer.as_bool().unwrap_or(default))
    }

    /// Write `contents` to `path`, asking before overwriting.
    ///
    /// Answering `a` sets the `force` param so later files are overwritten
    /// without asking; `q` halts the command with code 0. Returns whether
    /// the file was written.
    pub fn create_file(&mut self, path: impl AsRef<Path>, contents: &str) -> Result<bool> {
        let path = path.as_ref();
        let display = short_path(path);
        self.nl();

        let exists = path.is_file();
        let force = self.state.params.is_set("force");

        if exists && !force && !self.state.interactive {
            self.out("<warning>File exists, skipping</warning>.");
            return Ok(false);
        }

        if exists && !force {
            self.out(&format!("<warning>File `{}` exists</warning>", display));
            let prompt = Prompt::choice(
                "overwrite",
                "Do you want to overwrite?",
                &["y", "n", "a", "q"],
                Some("n"),
            );
            let answer = self.io.prompt(&prompt)?.as_string().to_lowercase();
            match answer.as_str() {
                "q" => {
                    self.out("<error>Quitting</error>.");
                    return Err(self.halt(0));
                }
                "a" => self.state.params.set("force", true),
                "y" => {}
                _ => {
                    self.out(&format!("Skip `{}`", display));
                    return Ok(false);
                }
            }
        } else {
            self.out(&format!("Creating file {}", display));
        }

        let written = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).and_then(|_| fs::write(path, contents))
            }
            _ => fs::write(path, contents),
        };

        match written {
            Ok(()) => {
                self.out(&format!("<success>Wrote</success> `{}`", display));
                Ok(true)
            }
            Err(e) => {
                tracing::debug!("Write to {} failed: {}", path.display(), e);
                self.err(&format!("<error>Could not write to `{}`</error>.", display));
                Ok(false)
            }
        }
    }

    /// `path` relative to the working directory when it lies inside it.
    pub fn short_path(&self, path: impl AsRef<Path>) -> String {
        short_path(path.as_ref())
    }

    /// Realize (or fetch) a declared task.
    pub fn task(&mut self, name: &str) -> Result<&mut Shell> {
        self.state.task(name)
    }

    /// Call `method` on a declared task with the current console.
    pub fn run_task(&mut self, name: &str, method: &str, args: Vec<String>) -> Result<CommandResult> {
        let task = self.state.task(name)?;
        task.call_method(method, &mut *self.io, args)
    }

    /// Write `message` as an error and build the abort signal.
    ///
    /// Return it from the handler: `return Err(ctx.abort("boom", 42));`
    pub fn abort(&mut self, message: &str, code: i32) -> ShellError {
        self.io.error(&format!("<error>{}</error>", message));
        StopSignal::Abort {
            message: message.to_string(),
            code,
        }
        .into()
    }

    /// Build a silent stop signal.
    pub fn halt(&self, code: i32) -> ShellError {
        StopSignal::Halt { code }.into()
    }

    /// Error for a listed method that `call` does not handle.
    pub fn unhandled(&self, method: &str) -> ShellError {
        ShellError::MissingMethod {
            shell: self.state.name.clone(),
            method: method.to_string(),
        }
    }
}

/// `path` relative to the working directory when it lies inside it.
pub fn short_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .filter(|relative| !relative.as_os_str().is_empty())
        .map(|relative| relative.display().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Scripted-answer key for a question: lowercased words joined by `_`.
fn prompt_key(question: &str) -> String {
    question
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
