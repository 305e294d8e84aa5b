//! The `completion` shell.
//!
//! Shell completion functions call `completion commands`,
//! `completion subcommands <shell>` and `completion options <shell> [sub]`
//! and split the single output line on spaces. `completion script <shell>`
//! prints a static script generated by `clap_complete`.

use std::rc::Rc;

use crate::error::{Result, ShellError};
use crate::naming::underscore;
use crate::options::{HelpFormat, InputArgument, InputSubcommand, OptionParser};
use crate::shell::{Catalog, Command, CommandResult, ShellContext, ShellState, MAIN_METHOD};

use super::inspect;

/// Shells `completion script` can generate for.
const SCRIPT_SHELLS: &[&str] = &["bash", "zsh", "fish", "elvish", "powershell"];

/// Completion helpers for interactive shells.
#[derive(Debug, Default)]
pub struct CompletionShell;

impl Command for CompletionShell {
    fn methods(&self) -> &'static [&'static str] {
        &["main", "commands", "subcommands", "options", "script"]
    }

    fn option_parser(&self, parser: OptionParser, _shell: &mut ShellState) -> Result<OptionParser> {
        Ok(parser
            .description("Used by shells like bash to autocomplete command names, options and arguments.")
            .add_subcommand(
                InputSubcommand::new("commands")
                    .help("Output a list of available commands.")
                    .parser(OptionParser::new("commands").description("List all available commands.")),
            )
            .add_subcommand(
                InputSubcommand::new("subcommands")
                    .help("Output a list of available subcommands.")
                    .parser(
                        OptionParser::new("subcommands")
                            .description("List subcommands for a command.")
                            .add_argument(InputArgument::new("command").help("The command name.")),
                    ),
            )
            .add_subcommand(
                InputSubcommand::new("options")
                    .help("Output a list of available options.")
                    .parser(
                        OptionParser::new("options")
                            .description("List options for a command and optional subcommand.")
                            .add_argument(InputArgument::new("command").help("The command name."))
                            .add_argument(InputArgument::new("subcommand").help("The subcommand name.")),
                    ),
            )
            .add_subcommand(
                InputSubcommand::new("script")
                    .help("Output a completion script.")
                    .parser(
                        OptionParser::new("script")
                            .description("Generate a completion script for an interactive shell.")
                            .add_argument(
                                InputArgument::new("shell")
                                    .help("The shell to generate for.")
                                    .required()
                                    .choices(SCRIPT_SHELLS),
                            ),
                    ),
            ))
    }

    fn welcome(&mut self, _ctx: &mut ShellContext<'_>) {}

    fn call(&mut self, method: &str, ctx: &mut ShellContext<'_>, args: Vec<String>) -> Result<CommandResult> {
        let catalog = Rc::clone(ctx.state().catalog());
        let root = ctx.state().root_name().to_string();

        let words = match method {
            "main" => {
                let help = ctx
                    .parser()
                    .map(|p| p.help(None, HelpFormat::Text))
                    .unwrap_or_default();
                ctx.out(&help);
                return Ok(CommandResult::success());
            }
            "commands" => commands(&catalog),
            "subcommands" => match args.first() {
                Some(command) => subcommands(&catalog, command, &root)?,
                None => Vec::new(),
            },
            "options" => match args.first() {
                Some(command) => options(&catalog, command, args.get(1).map(String::as_str), &root)?,
                None => Vec::new(),
            },
            "script" => {
                let shell = args.first().map(String::as_str).unwrap_or("bash");
                ctx.quiet(&script(&catalog, shell, &root)?);
                return Ok(CommandResult::success());
            }
            other => return Err(ctx.unhandled(other)),
        };

        if !words.is_empty() {
            ctx.out(&words.join(" "));
        }
        Ok(CommandResult::success())
    }
}

/// Every shell token and alias, sorted.
pub fn commands(catalog: &Catalog) -> Vec<String> {
    let mut words: Vec<String> = catalog.shells().map(|entry| entry.token()).collect();
    words.extend(catalog.aliases().keys().cloned());
    words.sort();
    words.dedup();
    words
}

/// Task names, handler names and declared subcommands of `command`.
pub fn subcommands(catalog: &Rc<Catalog>, command: &str, root: &str) -> Result<Vec<String>> {
    let Some(mut shell) = inspect(catalog, command, root)? else {
        return Ok(Vec::new());
    };

    let mut words: Vec<String> = shell.task_names().iter().map(|t| underscore(t)).collect();
    words.extend(
        shell
            .methods()
            .into_iter()
            .filter(|m| *m != MAIN_METHOD)
            .map(String::from),
    );
    words.extend(shell.option_parser()?.subcommands().into_iter().map(String::from));
    words.sort();
    words.dedup();
    Ok(words)
}

/// `--long` and `-s` forms of every option `command` (or its `subcommand`)
/// accepts.
pub fn options(catalog: &Rc<Catalog>, command: &str, subcommand: Option<&str>, root: &str) -> Result<Vec<String>> {
    let Some(mut shell) = inspect(catalog, command, root)? else {
        return Ok(Vec::new());
    };

    let mut parser = shell.option_parser()?;
    if let Some(nested) = subcommand
        .and_then(|name| parser.subcommand(&underscore(name)))
        .and_then(|sub| sub.parser.as_deref())
    {
        parser = nested.clone();
    }

    let mut words = Vec::new();
    for option in parser.options() {
        words.push(format!("--{}", option.name));
        if let Some(short) = option.short {
            words.push(format!("-{}", short));
        }
    }
    Ok(words)
}

/// Completion script for `shell` covering every registered shell.
pub fn script(catalog: &Rc<Catalog>, shell: &str, root: &str) -> Result<String> {
    let target: clap_complete::Shell = shell.parse().map_err(|_| ShellError::OptionParse {
        message: format!("Unsupported shell `{}`. Choose one of: {}", shell, SCRIPT_SHELLS.join(", ")),
    })?;

    let mut cmd = clap::Command::new(root.to_string()).bin_name(root.to_string());
    for entry in catalog.shells() {
        let token = entry.token();
        if let Some(mut inspected) = inspect(catalog, &token, root)? {
            let sub = inspected.option_parser()?.to_clap(true).name(token.clone()).bin_name(format!("{} {}", root, token));
            cmd = cmd.subcommand(sub);
        }
    }

    let mut buf = Vec::new();
    clap_complete::generate(target, &mut cmd, root.to_string(), &mut buf);
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
