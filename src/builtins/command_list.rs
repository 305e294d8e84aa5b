//! The `command_list` shell.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;

use crate::error::Result;
use crate::options::{InputOption, OptionParser};
use crate::shell::{Command, CommandResult, ShellContext, ShellState};

use super::shell_list;

/// Lists every registered shell, grouped by plugin.
#[derive(Debug, Default)]
pub struct CommandListShell;

#[derive(Debug, Serialize)]
struct Listing<'a> {
    shells: BTreeMap<&'a str, &'a [String]>,
    aliases: &'a BTreeMap<String, String>,
}

fn wants_json(ctx: &ShellContext<'_>) -> bool {
    ctx.params().get_str("format") == Some("json")
}

impl Command for CommandListShell {
    fn methods(&self) -> &'static [&'static str] {
        &["main"]
    }

    fn option_parser(&self, parser: OptionParser, _shell: &mut ShellState) -> Result<OptionParser> {
        Ok(parser
            .description("Get the list of available shells.")
            .add_option(InputOption::flag("version").help("Print the version and exit."))
            .add_option(
                InputOption::new("format")
                    .choices(&["text", "json"])
                    .default_value("text")
                    .help("Output format."),
            ))
    }

    fn welcome(&mut self, ctx: &mut ShellContext<'_>) {
        if !wants_json(ctx) && !ctx.params().is_set("version") {
            ctx.welcome_banner();
        }
    }

    fn call(&mut self, method: &str, ctx: &mut ShellContext<'_>, _args: Vec<String>) -> Result<CommandResult> {
        if method != "main" {
            return Err(ctx.unhandled(method));
        }

        if ctx.params().is_set("version") {
            ctx.quiet(env!("CARGO_PKG_VERSION"));
            return Ok(CommandResult::success());
        }

        let catalog = Rc::clone(ctx.state().catalog());
        let groups = shell_list(&catalog);

        if wants_json(ctx) {
            let listing = Listing {
                shells: groups
                    .iter()
                    .map(|(group, names)| (group.as_str(), names.as_slice()))
                    .collect(),
                aliases: catalog.aliases(),
            };
            let json = serde_json::to_string_pretty(&listing).map_err(anyhow::Error::from)?;
            ctx.quiet(&json);
            return Ok(CommandResult::success());
        }

        let root = ctx.state().root_name().to_string();
        ctx.out("<info>Available Shells:</info>");
        ctx.nl();
        for (group, names) in &groups {
            ctx.out(&format!("[<info>{}</info>] {}", group, names.join(", ")));
            ctx.nl();
        }

        if !catalog.aliases().is_empty() {
            ctx.out("<info>Aliases:</info>");
            for (short, target) in catalog.aliases() {
                ctx.out(&format!("  {} -> {}", short, target));
            }
            ctx.nl();
        }

        ctx.out(&format!("To run a core command, type <info>`{} shell_name [args]`</info>", root));
        ctx.out(&format!("To run a plugin command, type <info>`{} Plugin.shell_name [args]`</info>", root));
        ctx.out(&format!("To get help on a specific command, type <info>`{} shell_name --help`</info>", root));
        Ok(CommandResult::success())
    }
}
