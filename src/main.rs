//! taskshell CLI entry point.

use std::process::ExitCode;

use taskshell::builtins;
use taskshell::config::{is_ci, load_config};
use taskshell::dispatcher::{exit_status, Dispatcher};
use taskshell::logging::init_tracing;
use taskshell::shell::Catalog;
use taskshell::ui::{create_console, ConsoleIo, NonInteractiveConsole, OutputMode};

fn main() -> ExitCode {
    let log_control = init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    tracing::debug!("taskshell starting with args: {:?}", args);

    let project_root = std::env::current_dir().unwrap_or_default();
    let config = match load_config(&project_root) {
        Ok(config) => config,
        Err(e) => {
            let mut io = NonInteractiveConsole::new(OutputMode::Normal);
            io.error(&format!("Error: {}", e));
            return ExitCode::from(1);
        }
    };

    let is_interactive = config.interactive && !is_ci();
    let mut io = create_console(is_interactive, config.default_output, Some(log_control));

    let mut catalog = Catalog::new();
    builtins::register(&mut catalog);

    let mut dispatcher = Dispatcher::new(catalog, args).with_config(&config);
    let code = dispatcher.run(io.as_mut());
    ExitCode::from(exit_status(code))
}
