//! taskshell - command resolution and dispatch for task-oriented CLIs.
//!
//! A [`dispatcher::Dispatcher`] takes an argument vector, finds the shell the
//! first token names in a [`shell::Catalog`], and lets that shell resolve the
//! rest: a handler named after the next token, a task it delegates to, or its
//! `main` handler. Shells can stop early with an abort (error message and
//! exit code) or a halt (exit code only).
//!
//! # Modules
//!
//! - [`builtins`] - `command_list` and `completion` shells
//! - [`config`] - `.taskshell.yml` loading
//! - [`dispatcher`] - argv to shell routing, help and version fallback
//! - [`error`] - Error types, stop signals and result alias
//! - [`logging`] - Tracing setup with an output-mode driven filter
//! - [`naming`] - Token inflection and catalog keys
//! - [`options`] - Option/argument grammar and parsing
//! - [`shell`] - `Command` trait, resolution engine and task registry
//! - [`ui`] - Console output, prompts and tag styling
//!
//! # Example
//!
//! ```
//! use taskshell::dispatcher::Dispatcher;
//! use taskshell::shell::{Catalog, Command, CommandResult, ShellContext};
//! use taskshell::ui::MockConsole;
//!
//! struct Greet;
//!
//! impl Command for Greet {
//!     fn methods(&self) -> &'static [&'static str] {
//!         &["main"]
//!     }
//!
//!     fn call(
//!         &mut self,
//!         _method: &str,
//!         ctx: &mut ShellContext<'_>,
//!         args: Vec<String>,
//!     ) -> taskshell::Result<CommandResult> {
//!         ctx.out(&format!("Hello, {}", args.join(" ")));
//!         Ok(CommandResult::success())
//!     }
//! }
//!
//! let mut catalog = Catalog::new();
//! catalog.register_shell("greet", || Box::new(Greet));
//!
//! let mut io = MockConsole::new();
//! let code = Dispatcher::new(catalog, vec!["greet".into(), "world".into()]).run(&mut io);
//! assert_eq!(code, 0);
//! assert!(io.has_output("Hello, world"));
//! ```

pub mod builtins;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod naming;
pub mod options;
pub mod shell;
pub mod ui;

pub use error::{Result, ShellError};
