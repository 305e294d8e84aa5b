//! Top-level dispatch from an argument vector to a running shell.
//!
//! The first token names the shell; the rest is handed to the shell's
//! `run_command`. An empty invocation, `help`, `--help` and `-h` are rewritten
//! to run the `command_list` shell, and `version`/`--version` run it with
//! `--version`.

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::config::ShellConfig;
use crate::error::{Result, ShellError};
use crate::naming::plugin_split;
use crate::options::{Params, DEFAULT_ROOT_NAME};
use crate::shell::{Catalog, CommandResult, Shell};
use crate::ui::ConsoleIo;

/// Shell that lists available commands; the target of the help fallback.
pub const COMMAND_LIST: &str = "command_list";

const HELP_TOKENS: &[&str] = &["help", "--help", "-h"];
const VERSION_TOKENS: &[&str] = &["version", "--version"];

/// Process exit status for a dispatch exit code.
///
/// Codes wrap modulo 256 like a POSIX status; a non-zero code that would
/// wrap to 0 becomes 1.
pub fn exit_status(code: i32) -> u8 {
    match code as u8 {
        0 if code != 0 => 1,
        status => status,
    }
}

/// Routes one invocation to its shell.
#[derive(Debug)]
pub struct Dispatcher {
    args: Vec<String>,
    catalog: Rc<Catalog>,
    root_name: String,
    interactive: bool,
    extra: Params,
}

impl Dispatcher {
    /// Create a dispatcher for `args` (program name already stripped).
    pub fn new(catalog: Catalog, args: Vec<String>) -> Self {
        Self {
            args,
            catalog: Rc::new(catalog),
            root_name: DEFAULT_ROOT_NAME.to_string(),
            interactive: true,
            extra: Params::new(),
        }
    }

    /// Apply root name, interactivity and aliases from `config`.
    pub fn with_config(mut self, config: &ShellConfig) -> Self {
        if let Some(root_name) = &config.root_name {
            self.root_name = root_name.clone();
        }
        self.interactive = config.interactive;
        for (short, target) in &config.aliases {
            self.alias(short, target);
        }
        if config.short_plugin_aliases {
            self.add_short_plugin_aliases();
        }
        self
    }

    /// Params overlaid on every shell's parsed params.
    pub fn with_extra(mut self, extra: Params) -> Self {
        self.extra = extra;
        self
    }

    /// Remaining, not yet consumed, arguments.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Register `short` as another name for `target`.
    pub fn alias(&mut self, short: &str, target: &str) -> Option<String> {
        Rc::make_mut(&mut self.catalog).alias(short, target)
    }

    pub fn aliases(&self) -> &BTreeMap<String, String> {
        self.catalog.aliases()
    }

    /// Alias every plugin shell under its bare name.
    ///
    /// Names owned by a core shell or an existing alias are left alone.
    /// When several plugins provide the same name the first plugin, in
    /// catalog order, gets the alias.
    pub fn add_short_plugin_aliases(&mut self) -> &BTreeMap<String, String> {
        let core: BTreeSet<&str> = self
            .catalog
            .shells()
            .filter(|entry| entry.plugin.is_none())
            .map(|entry| entry.name.as_str())
            .collect();

        let mut owners: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for entry in self.catalog.shells() {
            if let Some(plugin) = &entry.plugin {
                owners.entry(entry.name.as_str()).or_default().push(plugin.as_str());
            }
        }

        let mut added = Vec::new();
        for (name, plugins) in &owners {
            let plugin = plugins[0];
            if core.contains(name) {
                tracing::debug!(
                    "command '{}' in plugin '{}' was not aliased, conflicts with another shell",
                    name,
                    plugin
                );
                continue;
            }
            if let Some(existing) = self.catalog.alias_target(name) {
                tracing::debug!(
                    "command '{}' in plugin '{}' was not aliased, conflicts with '{}'",
                    name,
                    plugin,
                    existing
                );
                continue;
            }
            if plugins.len() > 1 {
                tracing::debug!(
                    "command '{}' aliased to plugin '{}', also provided by '{}'",
                    name,
                    plugin,
                    plugins[1..].join("', '")
                );
            }
            added.push((name.to_string(), format!("{}.{}", plugin, name)));
        }

        let catalog = Rc::make_mut(&mut self.catalog);
        for (short, target) in added {
            catalog.alias(&short, &target);
        }
        self.catalog.aliases()
    }

    /// Construct the shell `token` names, after alias resolution.
    pub fn find_shell(&self, token: &str) -> Result<Shell> {
        let token = self.catalog.resolve(token);
        let command = self
            .catalog
            .make_shell(&token)
            .ok_or_else(|| ShellError::CommandNotFound {
                name: token.clone(),
            })?;

        let (plugin, name) = plugin_split(&token);
        let mut shell = Shell::from_command(command, name, Rc::clone(&self.catalog));
        shell.set_plugin(plugin);
        shell.set_root_name(&self.root_name);
        shell.set_interactive(self.interactive);
        Ok(shell)
    }

    /// Dispatch the remaining arguments once.
    pub fn dispatch(&mut self, io: &mut dyn ConsoleIo) -> Result<CommandResult> {
        let token = match self.shift_args() {
            Some(token) if VERSION_TOKENS.contains(&token.as_str()) => {
                self.args = vec![COMMAND_LIST.to_string(), "--version".to_string()];
                return self.fallback(io);
            }
            Some(token) if !HELP_TOKENS.contains(&token.as_str()) => token,
            _ => {
                self.args.insert(0, COMMAND_LIST.to_string());
                return self.fallback(io);
            }
        };

        tracing::debug!("Dispatching `{}` with {:?}", token, self.args);

        let mut shell = self.find_shell(&token)?;
        shell.set_interactive(self.interactive && io.is_interactive());
        shell.initialize()?;

        let argv = std::mem::take(&mut self.args);
        shell.run_command(&argv, true, &self.extra, io)
    }

    /// Dispatch and turn the outcome into a process exit code.
    ///
    /// Stop signals yield their own code. Any other error is written to the
    /// error channel and yields 1.
    pub fn run(&mut self, io: &mut dyn ConsoleIo) -> i32 {
        match self.dispatch(io) {
            Ok(result) => result.exit_code,
            Err(ShellError::Stop(signal)) => {
                tracing::debug!("Stopped: {}", signal);
                signal.code()
            }
            Err(err) => {
                io.error(&format!("<error>Error:</error> {}", err));
                err.exit_code()
            }
        }
    }

    fn fallback(&mut self, io: &mut dyn ConsoleIo) -> Result<CommandResult> {
        self.dispatch(io)?;
        Ok(CommandResult::success())
    }

    fn shift_args(&mut self) -> Option<String> {
        if self.args.is_empty() {
            None
        } else {
            Some(self.args.remove(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{InputOption, OptionParser};
    use crate::shell::{Command, ShellContext, ShellState};
    use crate::ui::MockConsole;
    use std::cell::{Cell, RefCell};

    /// Records every call it receives.
    #[derive(Default)]
    struct Probe {
        calls: Rc<RefCell<Vec<(String, Vec<String>)>>>,
        outcome: Outcome,
    }

    #[derive(Clone, Copy, Default)]
    enum Outcome {
        #[default]
        Unit,
        False,
        Code(i32),
        Abort(i32),
        Halt(i32),
    }

    impl Command for Probe {
        fn methods(&self) -> &'static [&'static str] {
            &["main"]
        }

        fn option_parser(&self, parser: OptionParser, _shell: &mut ShellState) -> Result<OptionParser> {
            Ok(parser.add_option(InputOption::flag("version")))
        }

        fn welcome(&mut self, _ctx: &mut ShellContext<'_>) {}

        fn call(&mut self, method: &str, ctx: &mut ShellContext<'_>, args: Vec<String>) -> Result<CommandResult> {
            self.calls.borrow_mut().push((method.to_string(), args));
            match self.outcome {
                Outcome::Unit => Ok(().into()),
                Outcome::False => Ok(false.into()),
                Outcome::Code(code) => Ok(code.into()),
                Outcome::Abort(code) => Err(ctx.abort("boom", code)),
                Outcome::Halt(code) => Err(ctx.halt(code)),
            }
        }
    }

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn probe_catalog(name: &str, outcome: Outcome) -> (Catalog, Rc<RefCell<Vec<(String, Vec<String>)>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut catalog = Catalog::new();
        let shared = Rc::clone(&calls);
        catalog.register_shell(name, move || {
            Box::new(Probe {
                calls: Rc::clone(&shared),
                outcome,
            })
        });
        (catalog, calls)
    }

    fn counting_list(catalog: &mut Catalog) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let shared = Rc::clone(&count);
        catalog.register_shell(COMMAND_LIST, move || {
            shared.set(shared.get() + 1);
            Box::new(Probe::default())
        });
        count
    }

    #[test]
    fn empty_invocation_runs_help_once() {
        let mut catalog = Catalog::new();
        let count = counting_list(&mut catalog);
        let mut io = MockConsole::new();

        let result = Dispatcher::new(catalog, vec![]).dispatch(&mut io).unwrap();
        assert_eq!(result, CommandResult::success());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn help_aliases_run_help_once() {
        for token in ["help", "--help", "-h"] {
            let mut catalog = Catalog::new();
            let count = counting_list(&mut catalog);
            let mut io = MockConsole::new();

            let code = Dispatcher::new(catalog, argv(&[token])).run(&mut io);
            assert_eq!(code, 0, "{}", token);
            assert_eq!(count.get(), 1, "{}", token);
        }
    }

    #[test]
    fn help_keeps_remaining_args() {
        let (catalog, calls) = probe_catalog(COMMAND_LIST, Outcome::Unit);
        let mut io = MockConsole::new();

        Dispatcher::new(catalog, argv(&["help", "extra"])).run(&mut io);
        assert_eq!(calls.borrow()[0], ("main".to_string(), argv(&["extra"])));
    }

    #[test]
    fn version_runs_command_list_with_flag() {
        let (catalog, calls) = probe_catalog(COMMAND_LIST, Outcome::Code(7));
        let mut io = MockConsole::new();

        let code = Dispatcher::new(catalog, argv(&["--version", "ignored"])).run(&mut io);
        assert_eq!(code, 0);
        assert_eq!(calls.borrow().len(), 1);
        assert!(calls.borrow()[0].1.is_empty());
    }

    #[test]
    fn unknown_shell_fails_with_message() {
        let mut io = MockConsole::new();
        let mut dispatcher = Dispatcher::new(Catalog::new(), argv(&["unknown-thing"]));

        assert_eq!(dispatcher.run(&mut io), 1);
        assert!(io.has_error("Shell class for \"unknown-thing\" could not be found."));
    }

    #[test]
    fn find_shell_reports_missing_name() {
        let err = Dispatcher::new(Catalog::new(), vec![])
            .find_shell("nope")
            .unwrap_err();
        assert!(matches!(err, ShellError::CommandNotFound { ref name } if name == "nope"));
    }

    #[test]
    fn results_normalize_to_exit_codes() {
        let cases = [
            (Outcome::Unit, 0),
            (Outcome::False, 1),
            (Outcome::Code(3), 3),
            (Outcome::Abort(42), 42),
            (Outcome::Halt(0), 0),
            (Outcome::Halt(5), 5),
        ];
        for (outcome, expected) in cases {
            let (catalog, _) = probe_catalog("build", outcome);
            let mut io = MockConsole::new();
            assert_eq!(Dispatcher::new(catalog, argv(&["build"])).run(&mut io), expected);
        }
    }

    #[test]
    fn abort_message_reaches_error_stream() {
        let (catalog, _) = probe_catalog("build", Outcome::Abort(42));
        let mut io = MockConsole::new();

        assert_eq!(Dispatcher::new(catalog, argv(&["build"])).run(&mut io), 42);
        assert!(io.has_error("boom"));
        assert!(!io.has_error("Error:"));
    }

    #[test]
    fn plugin_prefix_is_set_on_shell() {
        let (catalog, _) = probe_catalog("Migrations.status", Outcome::Unit);
        let shell = Dispatcher::new(catalog, vec![]).find_shell("migrations.status").unwrap();
        assert_eq!(shell.plugin(), Some("Migrations"));
        assert_eq!(shell.name(), "status");
    }

    #[test]
    fn aliases_resolve_to_targets() {
        let (catalog, calls) = probe_catalog("Migrations.status", Outcome::Unit);
        let mut io = MockConsole::new();
        let mut dispatcher = Dispatcher::new(catalog, argv(&["st", "now"]));
        dispatcher.alias("st", "migrations.status");

        assert_eq!(dispatcher.run(&mut io), 0);
        assert_eq!(calls.borrow()[0], ("main".to_string(), argv(&["now"])));
    }

    #[test]
    fn config_sets_root_name_and_aliases() {
        let (catalog, _) = probe_catalog("build", Outcome::Unit);
        let mut config = ShellConfig::default();
        config.root_name = Some("bin/app".into());
        config.interactive = false;
        config.aliases.insert("b".into(), "build".into());

        let dispatcher = Dispatcher::new(catalog, vec![]).with_config(&config);
        assert_eq!(dispatcher.aliases()["b"], "build");
        let shell = dispatcher.find_shell("b").unwrap();
        assert_eq!(shell.state().root_name(), "bin/app");
        assert!(!shell.is_interactive());
    }

    #[test]
    fn short_plugin_aliases_skip_conflicts() {
        let mut catalog = Catalog::new();
        catalog.register_shell("status", || Box::new(Probe::default()));
        catalog.register_shell("Migrations.status", || Box::new(Probe::default()));
        catalog.register_shell("Migrations.seed", || Box::new(Probe::default()));
        catalog.register_shell("Assets.build", || Box::new(Probe::default()));
        catalog.register_shell("Tools.build", || Box::new(Probe::default()));
        catalog.register_shell("Tools.lint", || Box::new(Probe::default()));

        let mut dispatcher = Dispatcher::new(catalog, vec![]);
        dispatcher.alias("lint", "status");
        let aliases = dispatcher.add_short_plugin_aliases().clone();

        assert!(!aliases.contains_key("status"));
        assert_eq!(aliases["seed"], "Migrations.seed");
        assert_eq!(aliases["build"], "Assets.build");
        assert_eq!(aliases["lint"], "status");
    }

    #[test]
    fn extra_params_reach_the_shell() {
        struct Extra(Rc<Cell<bool>>);
        impl Command for Extra {
            fn methods(&self) -> &'static [&'static str] {
                &["main"]
            }
            fn welcome(&mut self, _ctx: &mut ShellContext<'_>) {}
            fn call(&mut self, _m: &str, ctx: &mut ShellContext<'_>, _a: Vec<String>) -> Result<CommandResult> {
                self.0.set(ctx.params().is_set("dry_run"));
                Ok(CommandResult::success())
            }
        }

        let seen = Rc::new(Cell::new(false));
        let shared = Rc::clone(&seen);
        let mut catalog = Catalog::new();
        catalog.register_shell("build", move || Box::new(Extra(Rc::clone(&shared))));
        let mut io = MockConsole::new();

        Dispatcher::new(catalog, argv(&["build"]))
            .with_extra(Params::new().with("dry_run", true))
            .run(&mut io);
        assert!(seen.get());
    }

    #[test]
    fn exit_status_wraps_like_posix() {
        assert_eq!(exit_status(0), 0);
        assert_eq!(exit_status(42), 42);
        assert_eq!(exit_status(-1), 255);
        assert_eq!(exit_status(256), 1);
        assert_eq!(exit_status(257), 1);
    }
}
