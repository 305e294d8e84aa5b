//! Declarations that make up an option parser grammar.

use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction};
use serde::Serialize;

use super::OptionParser;

/// A named option such as `--connection default` or `-f`.
#[derive(Debug, Clone, Serialize)]
pub struct InputOption {
    pub name: String,
    pub short: Option<char>,
    pub help: String,
    pub boolean: bool,
    pub default: Option<String>,
    pub choices: Vec<String>,
    pub multiple: bool,
}

impl InputOption {
    /// Valued option with no default.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            short: None,
            help: String::new(),
            boolean: false,
            default: None,
            choices: Vec::new(),
            multiple: false,
        }
    }

    /// Boolean flag defaulting to `false`.
    pub fn flag(name: &str) -> Self {
        Self {
            boolean: true,
            ..Self::new(name)
        }
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    pub fn default_value(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    pub fn choices(mut self, choices: &[&str]) -> Self {
        self.choices = choices.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Accept the option more than once, collecting values into a list.
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    pub(crate) fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.name.clone())
            .long(self.name.clone())
            .help(self.help.clone());

        if let Some(short) = self.short {
            arg = arg.short(short);
        }

        if self.boolean {
            return arg.action(ArgAction::SetTrue);
        }

        arg = arg
            .value_name(self.name.clone())
            .action(if self.multiple {
                ArgAction::Append
            } else {
                ArgAction::Set
            });

        arg = if self.choices.is_empty() {
            arg.value_parser(value_parser!(String))
        } else {
            arg.value_parser(PossibleValuesParser::new(self.choices.clone()))
        };

        match &self.default {
            Some(default) => arg.default_value(default.clone()),
            None => arg,
        }
    }
}

/// A positional argument.
#[derive(Debug, Clone, Serialize)]
pub struct InputArgument {
    pub name: String,
    pub help: String,
    pub required: bool,
    pub choices: Vec<String>,
}

impl InputArgument {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            help: String::new(),
            required: false,
            choices: Vec::new(),
        }
    }

    pub fn help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn choices(mut self, choices: &[&str]) -> Self {
        self.choices = choices.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Build the clap argument. `help_id` exempts the argument from being
    /// required when that flag is present.
    pub(crate) fn to_arg(&self, index: usize, help_id: Option<&str>) -> Arg {
        let mut arg = Arg::new(self.name.clone())
            .index(index)
            .value_name(self.name.clone())
            .help(self.help.clone())
            .action(ArgAction::Set);

        arg = if self.choices.is_empty() {
            arg.value_parser(value_parser!(String))
        } else {
            arg.value_parser(PossibleValuesParser::new(self.choices.clone()))
        };

        if self.required {
            arg = match help_id {
                Some(id) => arg.required_unless_present(id.to_string()),
                None => arg.required(true),
            };
        }

        arg
    }
}

/// A declared subcommand, optionally with its own grammar.
#[derive(Debug, Clone)]
pub struct InputSubcommand {
    pub name: String,
    pub help: String,
    pub parser: Option<Box<OptionParser>>,
}

impl InputSubcommand {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            help: String::new(),
            parser: None,
        }
    }

    pub fn help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    pub fn parser(mut self, parser: OptionParser) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }
}
