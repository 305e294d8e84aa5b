//! Task declarations and the lazily realized task cache.
//!
//! A shell declares the tasks it may delegate to. Declarations are
//! normalized and validated against the catalog when the shell initializes,
//! but a task instance is only built the first time it is asked for. Later
//! requests return that same instance with the parent's current params and
//! args copied in.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::error::{Result, ShellError};
use crate::naming::{camelize, plugin_split, underscore};
use crate::options::Params;

use super::catalog::Catalog;
use super::Shell;

/// Free-form settings attached to a task declaration.
pub type TaskConfig = BTreeMap<String, serde_json::Value>;

/// Config key that substitutes a different task implementation.
pub const CLASS_NAME_KEY: &str = "className";

/// A task as written by the shell author.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskSpec {
    /// Bare name, e.g. `Report` or `Plugin.Report`.
    Name(String),
    /// Name plus settings.
    WithConfig(String, TaskConfig),
}

impl TaskSpec {
    pub fn name(name: &str) -> Self {
        Self::Name(name.to_string())
    }

    pub fn with_config(name: &str, config: TaskConfig) -> Self {
        Self::WithConfig(name.to_string(), config)
    }
}

impl From<&str> for TaskSpec {
    fn from(name: &str) -> Self {
        Self::name(name)
    }
}

/// Normalized declaration: implementation token plus settings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskDeclaration {
    pub class: String,
    pub config: TaskConfig,
}

impl TaskDeclaration {
    /// Token used to look the implementation up in the catalog.
    pub fn implementation(&self) -> &str {
        self.config
            .get(CLASS_NAME_KEY)
            .and_then(serde_json::Value::as_str)
            .unwrap_or(&self.class)
    }
}

/// Normalize declarations into a map keyed by the bare task name.
///
/// The plugin prefix is dropped from the key but kept in `class`.
pub fn normalize(specs: &[TaskSpec]) -> BTreeMap<String, TaskDeclaration> {
    specs
        .iter()
        .map(|spec| {
            let (class, config) = match spec {
                TaskSpec::Name(name) => (name.clone(), TaskConfig::new()),
                TaskSpec::WithConfig(name, config) => (name.clone(), config.clone()),
            };
            let (_, key) = plugin_split(&class);
            (key.to_string(), TaskDeclaration { class, config })
        })
        .collect()
}

/// Check that every declaration resolves to a registered task.
pub fn validate(map: &BTreeMap<String, TaskDeclaration>, catalog: &Catalog) -> Result<()> {
    for declaration in map.values() {
        let implementation = declaration.implementation();
        if !catalog.has_task(implementation) {
            return Err(ShellError::MissingTask {
                task: implementation.to_string(),
            });
        }
    }
    Ok(())
}

/// State a parent hands to the tasks it realizes.
pub(crate) struct Parent<'a> {
    pub catalog: &'a Rc<Catalog>,
    pub params: &'a Params,
    pub args: &'a [String],
    pub root_name: &'a str,
    pub interactive: bool,
}

/// Declared tasks of one shell and the instances realized so far.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    declarations: BTreeMap<String, TaskDeclaration>,
    names: Vec<String>,
    loaded: HashMap<String, Shell>,
}

impl TaskRegistry {
    /// Normalize and validate `specs`, adding them to this registry.
    pub fn load_declarations(&mut self, specs: &[TaskSpec], catalog: &Catalog) -> Result<()> {
        let map = normalize(specs);
        validate(&map, catalog)?;
        for (key, declaration) in map {
            if !self.names.contains(&key) {
                self.names.push(key.clone());
            }
            self.declarations.insert(key, declaration);
        }
        Ok(())
    }

    /// Declared task names, in declaration-map order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Declaration key matching `name` after camelizing both sides.
    pub fn key_for(&self, name: &str) -> Option<&str> {
        let wanted = camelize(name);
        if wanted.is_empty() {
            return None;
        }
        self.names
            .iter()
            .find(|n| camelize(n) == wanted)
            .map(String::as_str)
    }

    /// Whether `name` refers to a declared task.
    pub fn has_task(&self, name: &str) -> bool {
        self.key_for(name).is_some()
    }

    /// Declaration for `name`.
    pub fn declaration(&self, name: &str) -> Option<&TaskDeclaration> {
        self.key_for(name).and_then(|k| self.declarations.get(k))
    }

    /// Whether `name` has been realized.
    pub fn is_loaded(&self, name: &str) -> bool {
        self.key_for(name)
            .is_some_and(|k| self.loaded.contains_key(k))
    }

    /// Realize `name` on first use, or refresh the cached instance.
    pub(crate) fn get(&mut self, name: &str, parent: Parent<'_>) -> Result<&mut Shell> {
        let key = self
            .key_for(name)
            .ok_or_else(|| ShellError::MissingTask {
                task: name.to_string(),
            })?
            .to_string();

        if !self.loaded.contains_key(&key) {
            let shell = self.realize(&key, &parent)?;
            self.loaded.insert(key.clone(), shell);
        }

        let shell = self
            .loaded
            .get_mut(&key)
            .ok_or_else(|| ShellError::MissingTask { task: key.clone() })?;
        shell.state.params = parent.params.clone();
        shell.state.args = parent.args.to_vec();
        Ok(shell)
    }

    fn realize(&self, key: &str, parent: &Parent<'_>) -> Result<Shell> {
        let declaration = self
            .declarations
            .get(key)
            .ok_or_else(|| ShellError::MissingTask {
                task: key.to_string(),
            })?;
        let implementation = declaration.implementation();
        let mut command = parent
            .catalog
            .make_task(implementation)
            .ok_or_else(|| ShellError::MissingTask {
                task: implementation.to_string(),
            })?;
        command.configure(&declaration.config);

        tracing::debug!("Realizing task {} ({})", key, implementation);

        let (plugin, _) = plugin_split(&declaration.class);
        let mut shell = Shell::from_command(command, &underscore(key), Rc::clone(parent.catalog));
        shell.state.plugin = plugin.map(camelize);
        shell.state.root_name = parent.root_name.to_string();
        shell.state.interactive = parent.interactive;
        shell.state.params = parent.params.clone();
        shell.state.args = parent.args.to_vec();
        shell.initialize()?;
        Ok(shell)
    }
}
