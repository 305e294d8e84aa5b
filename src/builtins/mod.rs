//! Shells every taskshell binary ships with.
//!
//! - [`command_list`] lists the registered shells; it is also what the
//!   dispatcher runs for `help` and `version`
//! - [`completion`] answers shell-completion queries and prints completion
//!   scripts

pub mod command_list;
pub mod completion;

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::dispatcher::COMMAND_LIST;
use crate::error::Result;
use crate::naming::plugin_split;
use crate::shell::{Catalog, Shell};

pub use command_list::CommandListShell;
pub use completion::CompletionShell;

/// Group label for shells without a plugin prefix.
pub const CORE_GROUP: &str = "CORE";

/// Register the built-in shells.
pub fn register(catalog: &mut Catalog) {
    catalog.register_shell(COMMAND_LIST, || Box::new(CommandListShell));
    catalog.register_shell("completion", || Box::new(CompletionShell));
}

/// Shell names grouped by source, core shells first, names sorted.
pub fn shell_list(catalog: &Catalog) -> Vec<(String, Vec<String>)> {
    let mut core = Vec::new();
    let mut plugins: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for entry in catalog.shells() {
        match &entry.plugin {
            Some(plugin) => plugins.entry(plugin.clone()).or_default().push(entry.name.clone()),
            None => core.push(entry.name.clone()),
        }
    }

    let mut groups = Vec::new();
    if !core.is_empty() {
        core.sort();
        groups.push((CORE_GROUP.to_string(), core));
    }
    for (plugin, mut names) in plugins {
        names.sort();
        groups.push((plugin, names));
    }
    groups
}

/// Build and initialize the shell `token` names, for inspection only.
///
/// Returns `None` when nothing is registered under `token`.
pub(crate) fn inspect(catalog: &Rc<Catalog>, token: &str, root_name: &str) -> Result<Option<Shell>> {
    let token = catalog.resolve(token);
    let Some(command) = catalog.make_shell(&token) else {
        return Ok(None);
    };
    let (plugin, name) = plugin_split(&token);
    let mut shell = Shell::from_command(command, name, Rc::clone(catalog));
    shell.set_plugin(plugin);
    shell.set_root_name(root_name);
    shell.set_interactive(false);
    shell.initialize()?;
    Ok(Some(shell))
}
