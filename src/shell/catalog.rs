//! Registry of shell and task factories.
//!
//! Commands are looked up by catalog key (see [`crate::naming::class_key`]),
//! so `status`, `Status` and `migrations.status` resolve the way a user would
//! expect. Aliases map a short token onto a full one before lookup.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::naming::{camelize, class_key, plugin_split, underscore, SHELL_SUFFIX, TASK_SUFFIX};

use super::Command;

/// Constructor for a fresh command instance.
pub type Factory = Rc<dyn Fn() -> Box<dyn Command>>;

/// A registered shell, as shown in listings.
#[derive(Clone)]
pub struct ShellEntry {
    /// Plugin prefix, `None` for core shells.
    pub plugin: Option<String>,
    /// Underscored shell name.
    pub name: String,
    factory: Factory,
}

impl ShellEntry {
    /// Token a user types to run this shell.
    pub fn token(&self) -> String {
        match &self.plugin {
            Some(plugin) => format!("{}.{}", plugin, self.name),
            None => self.name.clone(),
        }
    }
}

impl std::fmt::Debug for ShellEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellEntry")
            .field("plugin", &self.plugin)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Shells, tasks and aliases known to a dispatcher.
#[derive(Clone, Default)]
pub struct Catalog {
    shells: BTreeMap<String, ShellEntry>,
    tasks: BTreeMap<String, Factory>,
    aliases: BTreeMap<String, String>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shell under `token` (`name` or `Plugin.name`).
    pub fn register_shell<F>(&mut self, token: &str, factory: F)
    where
        F: Fn() -> Box<dyn Command> + 'static,
    {
        let (plugin, name) = plugin_split(token);
        let entry = ShellEntry {
            plugin: plugin.map(camelize),
            name: underscore(name),
            factory: Rc::new(factory),
        };
        self.shells.insert(class_key(token, SHELL_SUFFIX), entry);
    }

    /// Register a task under `token` (`Name` or `Plugin.Name`).
    pub fn register_task<F>(&mut self, token: &str, factory: F)
    where
        F: Fn() -> Box<dyn Command> + 'static,
    {
        self.tasks
            .insert(class_key(token, TASK_SUFFIX), Rc::new(factory));
    }

    /// Whether a shell resolves for `token`.
    pub fn has_shell(&self, token: &str) -> bool {
        self.shells.contains_key(&class_key(token, SHELL_SUFFIX))
    }

    /// Whether a task resolves for `token`.
    pub fn has_task(&self, token: &str) -> bool {
        self.tasks.contains_key(&class_key(token, TASK_SUFFIX))
    }

    /// Construct the shell registered for `token`.
    pub fn make_shell(&self, token: &str) -> Option<Box<dyn Command>> {
        self.shells
            .get(&class_key(token, SHELL_SUFFIX))
            .map(|entry| (entry.factory)())
    }

    /// Construct the task registered for `token`.
    pub fn make_task(&self, token: &str) -> Option<Box<dyn Command>> {
        self.tasks
            .get(&class_key(token, TASK_SUFFIX))
            .map(|factory| factory())
    }

    /// All registered shells, ordered by catalog key.
    pub fn shells(&self) -> impl Iterator<Item = &ShellEntry> {
        self.shells.values()
    }

    /// Map `short` onto `target`. Returns the previous target, if any.
    pub fn alias(&mut self, short: &str, target: &str) -> Option<String> {
        self.aliases.insert(short.to_string(), target.to_string())
    }

    /// Target registered for `short`.
    pub fn alias_target(&self, short: &str) -> Option<&str> {
        self.aliases.get(short).map(String::as_str)
    }

    /// All aliases.
    pub fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    /// Apply aliases and normalize a user token to `Plugin.name` form.
    pub fn resolve(&self, token: &str) -> String {
        let token = self.alias_target(token).unwrap_or(token);
        match plugin_split(token) {
            (Some(plugin), name) => format!("{}.{}", camelize(plugin), name),
            (None, name) => name.to_string(),
        }
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("shells", &self.shells.keys().collect::<Vec<_>>())
            .field("tasks", &self.tasks.keys().collect::<Vec<_>>())
            .field("aliases", &self.aliases)
            .finish()
    }
}
