//! Command resolution and execution.
//!
//! A [`Command`] is the user-facing behavior: it names its handlers, declares
//! the tasks it may delegate to and shapes its option parser. A [`Shell`]
//! wraps a command with the state the engine needs (identity, parsed params
//! and args, realized tasks) and decides which handler a token runs.
//!
//! Resolution for `run_command(argv, auto_method, extra)`, in order:
//!
//! 1. a handler named after `argv[0]`, when `auto_method` is set and the
//!    parser declares no subcommands (the token is shifted off the args);
//! 2. a handler named after `argv[0]` that is also a declared subcommand;
//! 3. a declared task named after `argv[0]` that is also a declared
//!    subcommand, run with the remaining tokens and no welcome banner;
//! 4. the `main` handler.
//!
//! Anything else is reported with the shell's help and a failing result.

pub mod catalog;
pub mod context;
pub mod result;
pub mod tasks;

use std::rc::Rc;

use crate::error::{Result, ShellError};
use crate::naming::{camelize, underscore};
use crate::options::{HelpFormat, InputSubcommand, OptionParser, Params, DEFAULT_ROOT_NAME};
use crate::ui::{ConsoleIo, OutputMode};

pub use catalog::{Catalog, Factory, ShellEntry};
pub use context::{short_path, ShellContext};
pub use result::CommandResult;
pub use tasks::{normalize, validate, TaskConfig, TaskDeclaration, TaskRegistry, TaskSpec};

use tasks::Parent;

/// Name of the fallback handler.
pub const MAIN_METHOD: &str = "main";

/// Param set on a delegated task so it skips its welcome banner.
pub const REQUESTED_PARAM: &str = "requested";

/// Engine and helper names that never resolve as handlers.
const RESERVED_METHODS: &[&str] = &[
    "abort",
    "ask",
    "call",
    "configure",
    "confirm",
    "create_file",
    "err",
    "halt",
    "hr",
    "info",
    "initialize",
    "methods",
    "nl",
    "option_parser",
    "out",
    "param",
    "quiet",
    "run_command",
    "short_path",
    "startup",
    "success",
    "task",
    "tasks",
    "teardown",
    "verbose",
    "warn",
    "welcome",
];

/// Behavior of a dispatchable shell or a task.
///
/// Only [`Command::call`] is required. Handlers are looked up by the names
/// returned from [`Command::methods`].
pub trait Command {
    /// Handler names, snake_case. Include `main` to accept bare invocations.
    fn methods(&self) -> &'static [&'static str] {
        &[]
    }

    /// Tasks this command may delegate to.
    fn tasks(&self) -> Vec<TaskSpec> {
        Vec::new()
    }

    /// Customize the default parser (which carries `--help`, `--verbose`
    /// and `--quiet`).
    fn option_parser(&self, parser: OptionParser, _shell: &mut ShellState) -> Result<OptionParser> {
        Ok(parser)
    }

    /// Receive the settings a parent declared for this task.
    fn configure(&mut self, _config: &TaskConfig) {}

    /// Setup run once, before the command's tasks are loaded.
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Banner shown before a handler runs, unless the command was delegated to.
    ///
    /// Does nothing by default; [`ShellContext::welcome_banner`] prints the
    /// standard one.
    fn welcome(&mut self, _ctx: &mut ShellContext<'_>) {}

    /// Hook run after the banner and before the handler.
    fn startup(&mut self, _ctx: &mut ShellContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Hook run when a handler fails or stops, before the error propagates.
    fn teardown(&mut self, _ctx: &mut ShellContext<'_>, _error: &ShellError) {}

    /// Run the handler `method`, one of the names from [`Command::methods`].
    fn call(&mut self, method: &str, ctx: &mut ShellContext<'_>, args: Vec<String>) -> Result<CommandResult>;
}

/// Everything a shell knows apart from its behavior.
#[derive(Debug)]
pub struct ShellState {
    pub(crate) name: String,
    pub(crate) plugin: Option<String>,
    pub(crate) root_name: String,
    pub(crate) interactive: bool,
    pub(crate) params: Params,
    pub(crate) args: Vec<String>,
    pub(crate) command: Option<String>,
    pub(crate) parser: Option<OptionParser>,
    pub(crate) tasks: TaskRegistry,
    pub(crate) catalog: Rc<Catalog>,
    initialized: bool,
}

impl ShellState {
    pub fn new(name: &str, catalog: Rc<Catalog>) -> Self {
        Self {
            name: underscore(name),
            plugin: None,
            root_name: DEFAULT_ROOT_NAME.to_string(),
            interactive: true,
            params: Params::new(),
            args: Vec::new(),
            command: None,
            parser: None,
            tasks: TaskRegistry::default(),
            catalog,
            initialized: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn plugin(&self) -> Option<&str> {
        self.plugin.as_deref()
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn catalog(&self) -> &Rc<Catalog> {
        &self.catalog
    }

    pub fn tasks(&self) -> &TaskRegistry {
        &self.tasks
    }

    /// Realize a declared task on first use; later calls return the same
    /// instance with this shell's current params and args copied in.
    pub fn task(&mut self, name: &str) -> Result<&mut Shell> {
        let parent = Parent {
            catalog: &self.catalog,
            params: &self.params,
            args: &self.args,
            root_name: &self.root_name,
            interactive: self.interactive,
        };
        self.tasks.get(name, parent)
    }

    /// Parser of a declared task, for use as a subcommand parser.
    pub fn task_parser(&mut self, name: &str) -> Result<OptionParser> {
        self.task(name)?.option_parser()
    }

    /// Add every declared task to `parser` as a subcommand carrying the
    /// task's own parser.
    pub fn add_task_subcommands(&mut self, mut parser: OptionParser) -> Result<OptionParser> {
        for name in self.tasks.names().to_vec() {
            let task_parser = self.task_parser(&name)?;
            let mut subcommand = InputSubcommand::new(&underscore(&name));
            if let Some(description) = task_parser.summary() {
                subcommand = subcommand.help(description);
            }
            parser.insert_subcommand(subcommand.parser(task_parser));
        }
        Ok(parser)
    }
}

/// A command bound to its engine state.
pub struct Shell {
    command: Box<dyn Command>,
    pub(crate) state: ShellState,
}

impl Shell {
    /// Wrap `command` as a shell called `name`.
    pub fn new<C: Command + 'static>(command: C, name: &str, catalog: Rc<Catalog>) -> Self {
        Self::from_command(Box::new(command), name, catalog)
    }

    pub fn from_command(command: Box<dyn Command>, name: &str, catalog: Rc<Catalog>) -> Self {
        Self {
            command,
            state: ShellState::new(name, catalog),
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn name(&self) -> &str {
        &self.state.name
    }

    pub fn plugin(&self) -> Option<&str> {
        self.state.plugin.as_deref()
    }

    pub fn set_plugin(&mut self, plugin: Option<&str>) {
        self.state.plugin = plugin
            .map(|p| p.trim_matches('.'))
            .filter(|p| !p.is_empty())
            .map(String::from);
    }

    pub fn set_root_name(&mut self, root_name: &str) {
        self.state.root_name = root_name.to_string();
    }

    pub fn is_interactive(&self) -> bool {
        self.state.interactive
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.state.interactive = interactive;
    }

    pub fn params(&self) -> &Params {
        &self.state.params
    }

    pub fn args(&self) -> &[String] {
        &self.state.args
    }

    /// Command name resolved by the last `run_command`.
    pub fn command_name(&self) -> Option<&str> {
        self.state.command.as_deref()
    }

    /// Run the command's setup hook and load its tasks. Repeated calls are
    /// no-ops.
    pub fn initialize(&mut self) -> Result<()> {
        if self.state.initialized {
            return Ok(());
        }
        self.command.initialize()?;
        let specs = self.command.tasks();
        self.state.tasks.load_declarations(&specs, &self.state.catalog)?;
        self.state.initialized = true;
        Ok(())
    }

    /// Build this shell's parser.
    pub fn option_parser(&mut self) -> Result<OptionParser> {
        let mut parser = OptionParser::new(&self.state.name);
        parser.set_root_name(&self.state.root_name);
        self.command.option_parser(parser, &mut self.state)
    }

    /// Handler names that can be dispatched, sorted.
    pub fn methods(&self) -> Vec<&'static str> {
        let mut methods: Vec<&'static str> = self
            .command
            .methods()
            .iter()
            .copied()
            .filter(|m| !RESERVED_METHODS.contains(m))
            .collect();
        methods.sort_unstable();
        methods
    }

    /// Whether a handler named `name` (in any casing) exists.
    pub fn has_method(&self, name: &str) -> bool {
        self.find_method(name).is_some()
    }

    /// Whether a task named `name` (in any casing) is declared.
    pub fn has_task(&self, name: &str) -> bool {
        self.state.tasks.has_task(name)
    }

    pub fn task_names(&self) -> &[String] {
        self.state.tasks.names()
    }

    /// See [`ShellState::task`].
    pub fn task(&mut self, name: &str) -> Result<&mut Shell> {
        self.state.task(name)
    }

    fn find_method(&self, name: &str) -> Option<&'static str> {
        let wanted = camelize(name);
        if wanted.is_empty() {
            return None;
        }
        self.command
            .methods()
            .iter()
            .copied()
            .filter(|m| !RESERVED_METHODS.contains(m))
            .find(|m| camelize(m) == wanted)
    }

    /// Parse `argv` and run the handler it resolves to.
    ///
    /// `extra` is overlaid on the parsed params. Parse errors are reported
    /// on the error channel and yield a failing result; errors raised by the
    /// handler, including stop signals, propagate.
    pub fn run_command(
        &mut self,
        argv: &[String],
        auto_method: bool,
        extra: &Params,
        io: &mut dyn ConsoleIo,
    ) -> Result<CommandResult> {
        let command = argv.first().map(|token| underscore(token));
        let parser = self.option_parser()?;

        match parser.parse(argv) {
            Ok((params, args)) => {
                self.state.params = params;
                self.state.args = args;
            }
            Err(ShellError::OptionParse { message }) => {
                io.error(&format!("<error>Error:</error> {}", message));
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        }

        self.state.params.merge(extra);
        self.set_output_level(io);
        self.state.command = command.clone();
        self.state.parser = Some(parser.clone());

        if self.state.params.is_set("help") {
            return Ok(self.display_help(&parser, command.as_deref(), io));
        }

        let command = command.unwrap_or_default();
        let declared = parser.has_subcommand(&command);

        if let Some(method) = self.find_method(&command) {
            if auto_method && parser.subcommands().is_empty() {
                tracing::debug!("{}: running `{}` by name", self.state.name, method);
                if !self.state.args.is_empty() {
                    self.state.args.remove(0);
                }
                self.startup(io)?;
                return self.invoke(method, io);
            }

            if declared {
                tracing::debug!("{}: running subcommand `{}`", self.state.name, method);
                self.startup(io)?;
                return self.invoke(method, io);
            }
        }

        if declared && self.has_task(&command) {
            tracing::debug!("{}: delegating to task `{}`", self.state.name, command);
            self.startup(io)?;
            let extra = Params::new().with(REQUESTED_PARAM, true);
            let task = self.state.task(&command)?;
            return task.run_command(&argv[1..], false, &extra, io);
        }

        if let Some(method) = self.find_method(MAIN_METHOD) {
            tracing::debug!("{}: falling back to main", self.state.name);
            self.state.command = Some(MAIN_METHOD.to_string());
            self.startup(io)?;
            return self.invoke(method, io);
        }

        tracing::debug!("{}: nothing matched `{}`", self.state.name, command);
        io.error("<error>No subcommand provided. Choose one of the available subcommands.</error>");
        io.error(&parser.help(None, HelpFormat::Text));
        Ok(CommandResult::failure(1))
    }

    /// Call a handler by name with explicit args, skipping resolution.
    pub fn call_method(
        &mut self,
        method: &str,
        io: &mut dyn ConsoleIo,
        args: Vec<String>,
    ) -> Result<CommandResult> {
        let method = self.find_method(method).ok_or_else(|| ShellError::MissingMethod {
            shell: self.state.name.clone(),
            method: method.to_string(),
        })?;
        self.state.args = args;
        self.invoke(method, io)
    }

    /// Show the welcome banner unless this shell was delegated to, then run
    /// the command's startup hook.
    pub fn startup(&mut self, io: &mut dyn ConsoleIo) -> Result<()> {
        let mut ctx = ShellContext::new(&mut self.state, io);
        if !ctx.params().is_set(REQUESTED_PARAM) {
            self.command.welcome(&mut ctx);
        }
        self.command.startup(&mut ctx)
    }

    fn invoke(&mut self, method: &str, io: &mut dyn ConsoleIo) -> Result<CommandResult> {
        let args = self.state.args.clone();
        let mut ctx = ShellContext::new(&mut self.state, io);
        match self.command.call(method, &mut ctx, args) {
            Ok(result) => Ok(result),
            Err(err) => {
                self.command.teardown(&mut ctx, &err);
                Err(err)
            }
        }
    }

    fn set_output_level(&self, io: &mut dyn ConsoleIo) {
        let current = io.output_mode();
        io.set_loggers(current);
        if self.state.params.is_set("quiet") {
            io.set_output_mode(OutputMode::Quiet);
            io.set_loggers(OutputMode::Quiet);
        }
        if self.state.params.is_set("verbose") {
            io.set_output_mode(OutputMode::Verbose);
            io.set_loggers(OutputMode::Verbose);
        }
    }

    fn display_help(
        &mut self,
        parser: &OptionParser,
        command: Option<&str>,
        io: &mut dyn ConsoleIo,
    ) -> CommandResult {
        let format = if self.state.args.first().map(String::as_str) == Some("json") {
            HelpFormat::Json
        } else {
            if !self.state.params.is_set(REQUESTED_PARAM) {
                let mut ctx = ShellContext::new(&mut self.state, io);
                self.command.welcome(&mut ctx);
            }
            HelpFormat::Text
        };

        let subcommand = command.filter(|c| parser.has_subcommand(c));
        io.message(&parser.help(subcommand, format));
        CommandResult::success()
    }
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("methods", &self.command.methods())
            .field("state", &self.state)
            .finish()
    }
}
