//! Option and argument parsing for shells.
//!
//! An [`OptionParser`] is a declarative grammar: named options, positional
//! arguments, and subcommands that may carry their own grammar. Parsing is
//! delegated to a `clap::Command` generated from the grammar, so shells get
//! clap's handling of `--name=value`, grouped short flags and choice
//! validation without depending on clap types themselves.
//!
//! # Example
//!
//! ```
//! use taskshell::options::{InputOption, InputSubcommand, OptionParser};
//!
//! let parser = OptionParser::new("report")
//!     .add_option(InputOption::new("format").choices(&["csv", "json"]).default_value("csv"))
//!     .add_subcommand(InputSubcommand::new("weekly").help("Last seven days"));
//!
//! let (params, args) = parser.parse(&["weekly".into(), "--quiet".into(), "extra".into()]).unwrap();
//! assert!(params.is_set("quiet"));
//! assert_eq!(params.get_str("format"), Some("csv"));
//! assert_eq!(args, vec!["extra".to_string()]);
//! ```

pub mod help;
pub mod input;
pub mod params;

use std::collections::BTreeMap;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches};

use crate::error::{Result, ShellError};
use crate::naming::underscore;

pub use help::{suggest, HelpFormat};
pub use input::{InputArgument, InputOption, InputSubcommand};
pub use params::{ParamValue, Params};

/// Root name shown in usage lines when none is configured.
pub const DEFAULT_ROOT_NAME: &str = "taskshell";

/// Id of the hidden catch-all positional used when no arguments are declared.
const REST_ID: &str = "__args";

/// Declarative option/argument grammar for one command.
#[derive(Debug, Clone)]
pub struct OptionParser {
    command: String,
    root_name: String,
    description: Option<String>,
    epilog: Option<String>,
    options: Vec<InputOption>,
    arguments: Vec<InputArgument>,
    subcommands: BTreeMap<String, InputSubcommand>,
}

impl OptionParser {
    /// Create a parser with the default `help`, `verbose` and `quiet` flags.
    pub fn new(command: &str) -> Self {
        Self::bare(command)
            .add_option(InputOption::flag("help").short('h').help("Display this help."))
            .add_option(InputOption::flag("verbose").short('v').help("Enable verbose output."))
            .add_option(InputOption::flag("quiet").short('q').help("Enable quiet output."))
    }

    /// Create a parser without default options.
    pub fn bare(command: &str) -> Self {
        Self {
            command: underscore(command),
            root_name: DEFAULT_ROOT_NAME.to_string(),
            description: None,
            epilog: None,
            options: Vec::new(),
            arguments: Vec::new(),
            subcommands: BTreeMap::new(),
        }
    }

    /// The command name this parser belongs to.
    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn set_command(&mut self, command: &str) {
        self.command = command.to_string();
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn set_root_name(&mut self, root_name: &str) {
        self.root_name = root_name.to_string();
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// The description, if one was set.
    pub fn summary(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn epilog(mut self, epilog: &str) -> Self {
        self.epilog = Some(epilog.to_string());
        self
    }

    /// Add an option. An option with the same name is replaced.
    pub fn add_option(mut self, option: InputOption) -> Self {
        self.options.retain(|o| o.name != option.name);
        self.options.push(option);
        self
    }

    /// Add a positional argument after any already declared.
    pub fn add_argument(mut self, argument: InputArgument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Add a subcommand. A subcommand with the same name is replaced.
    pub fn add_subcommand(mut self, subcommand: InputSubcommand) -> Self {
        self.subcommands.insert(subcommand.name.clone(), subcommand);
        self
    }

    /// In-place variant of [`OptionParser::add_subcommand`].
    pub fn insert_subcommand(&mut self, subcommand: InputSubcommand) {
        self.subcommands.insert(subcommand.name.clone(), subcommand);
    }

    /// Remove a subcommand.
    pub fn remove_subcommand(&mut self, name: &str) {
        self.subcommands.remove(name);
    }

    /// Declared options.
    pub fn options(&self) -> &[InputOption] {
        &self.options
    }

    /// Declared positional arguments.
    pub fn arguments(&self) -> &[InputArgument] {
        &self.arguments
    }

    /// Declared subcommand names, sorted.
    pub fn subcommands(&self) -> Vec<&str> {
        self.subcommands.keys().map(String::as_str).collect()
    }

    /// Whether `name` is a declared subcommand.
    pub fn has_subcommand(&self, name: &str) -> bool {
        self.subcommands.contains_key(name)
    }

    /// Look up a declared subcommand.
    pub fn subcommand(&self, name: &str) -> Option<&InputSubcommand> {
        self.subcommands.get(name)
    }

    /// Name shown in usage lines, e.g. `taskshell report weekly`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.root_name, self.command)
    }

    /// Parse `argv` into params and positional args.
    ///
    /// When the first token names a declared subcommand it is consumed, and
    /// if that subcommand has its own parser the remaining tokens are parsed
    /// by it instead.
    pub fn parse(&self, argv: &[String]) -> Result<(Params, Vec<String>)> {
        let mut tokens = argv;
        if let Some(first) = argv.first() {
            if let Some(sub) = self.subcommands.get(&underscore(first)) {
                tokens = &argv[1..];
                if let Some(parser) = &sub.parser {
                    return parser.parse(tokens);
                }
            }
        }

        let tokens: Vec<&String> = tokens
            .iter()
            .filter(|t| !self.subcommands.contains_key(t.as_str()))
            .collect();

        let matches = self
            .to_clap(false)
            .try_get_matches_from(tokens)
            .map_err(|e| ShellError::OptionParse {
                message: clap_message(&e),
            })?;

        Ok((self.collect_params(&matches), self.collect_args(&matches)))
    }

    /// Render help for the whole command or for one subcommand.
    ///
    /// A subcommand with its own parser renders that parser under the name
    /// `<command> <subcommand>`. An undeclared subcommand renders an error
    /// with a suggestion.
    pub fn help(&self, subcommand: Option<&str>, format: HelpFormat) -> String {
        if let Some(name) = subcommand {
            match self.subcommands.get(name) {
                Some(InputSubcommand {
                    parser: Some(parser),
                    ..
                }) => {
                    let mut sub = parser.as_ref().clone();
                    sub.set_command(&format!("{} {}", self.command, sub.command));
                    sub.set_root_name(&self.root_name);
                    return sub.help(None, format);
                }
                Some(_) => {}
                None => return help::unknown_subcommand(self, name),
            }
        }

        match format {
            HelpFormat::Text => self.to_clap(true).render_help().to_string(),
            HelpFormat::Json => help::render_json(self),
        }
    }

    fn help_id(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.name == "help" && o.boolean)
            .map(|o| o.name.as_str())
    }

    /// Build the clap command for this grammar.
    ///
    /// Subcommands are only attached for help rendering; during parsing they
    /// have already been consumed.
    pub(crate) fn to_clap(&self, for_help: bool) -> clap::Command {
        let mut cmd = clap::Command::new(self.command.clone())
            .bin_name(self.display_name())
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .disable_help_subcommand(true)
            .args_override_self(true);

        if let Some(description) = &self.description {
            cmd = cmd.about(description.clone());
        }

        let mut after_help = Vec::new();
        if for_help && !self.subcommands.is_empty() {
            after_help.push(format!(
                "To see help on a subcommand use `{} [subcommand] --help`",
                self.display_name()
            ));
        }
        if let Some(epilog) = &self.epilog {
            after_help.push(epilog.clone());
        }
        if !after_help.is_empty() {
            cmd = cmd.after_help(after_help.join("\n\n"));
        }

        for option in &self.options {
            cmd = cmd.arg(option.to_arg());
        }

        if self.arguments.is_empty() {
            if !for_help {
                cmd = cmd.arg(
                    Arg::new(REST_ID)
                        .num_args(0..)
                        .action(ArgAction::Append)
                        .value_parser(clap::value_parser!(String))
                        .hide(true),
                );
            }
        } else {
            let help_id = self.help_id();
            for (i, argument) in self.arguments.iter().enumerate() {
                cmd = cmd.arg(argument.to_arg(i + 1, help_id));
            }
        }

        if for_help {
            cmd = cmd.subcommand_help_heading("Subcommands");
            for sub in self.subcommands.values() {
                cmd = cmd.subcommand(clap::Command::new(sub.name.clone()).about(sub.help.clone()));
            }
        }

        cmd
    }

    fn collect_params(&self, matches: &ArgMatches) -> Params {
        let mut params = Params::new();
        for option in &self.options {
            let name = option.name.as_str();
            if option.boolean {
                params.set(name, matches.get_flag(name));
            } else if option.multiple {
                if let Some(values) = matches.get_many::<String>(name) {
                    params.set(name, values.cloned().collect::<Vec<_>>());
                }
            } else if let Some(value) = matches.get_one::<String>(name) {
                params.set(name, value.clone());
            }
        }
        params
    }

    fn collect_args(&self, matches: &ArgMatches) -> Vec<String> {
        if self.arguments.is_empty() {
            return matches
                .get_many::<String>(REST_ID)
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
        }
        self.arguments
            .iter()
            .map_while(|a| matches.get_one::<String>(&a.name).cloned())
            .collect()
    }
}

/// Single-line message for a clap parse error.
///
/// Keeps the first paragraph of clap's rendering, which names the offending
/// token or the missing arguments, and drops usage and tips.
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let message = rendered
        .lines()
        .take_while(|line| !line.trim().is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    let message = message.trim_start_matches("error: ").to_string();
    if message.is_empty() {
        match err.kind() {
            ErrorKind::UnknownArgument => "Unknown option.".to_string(),
            kind => kind.to_string(),
        }
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn report_parser() -> OptionParser {
        let weekly = OptionParser::new("weekly").add_option(InputOption::flag("email").short('e'));
        OptionParser::new("report")
            .add_option(InputOption::new("format").choices(&["csv", "json"]).default_value("csv"))
            .add_subcommand(InputSubcommand::new("weekly").help("Last seven days").parser(weekly))
            .add_subcommand(InputSubcommand::new("daily").help("Today"))
    }

    #[test]
    fn default_options_are_false() {
        let (params, args) = OptionParser::new("build").parse(&[]).unwrap();
        assert_eq!(params.get("help"), Some(&ParamValue::Bool(false)));
        assert_eq!(params.get("verbose"), Some(&ParamValue::Bool(false)));
        assert_eq!(params.get("quiet"), Some(&ParamValue::Bool(false)));
        assert!(args.is_empty());
    }

    #[test]
    fn positional_args_keep_order_around_options() {
        let parser = OptionParser::new("build");
        let (params, args) = parser.parse(&argv(&["one", "--verbose", "two", "-q", "three"])).unwrap();
        assert_eq!(args, argv(&["one", "two", "three"]));
        assert!(params.is_set("verbose"));
        assert!(params.is_set("quiet"));
    }

    #[test]
    fn grouped_short_flags() {
        let (params, _) = OptionParser::new("build").parse(&argv(&["-vq"])).unwrap();
        assert!(params.is_set("verbose"));
        assert!(params.is_set("quiet"));
    }

    #[test]
    fn long_option_with_equals_and_space() {
        let parser = OptionParser::new("db").add_option(InputOption::new("connection"));
        let (params, _) = parser.parse(&argv(&["--connection=test"])).unwrap();
        assert_eq!(params.get_str("connection"), Some("test"));
        let (params, _) = parser.parse(&argv(&["--connection", "other"])).unwrap();
        assert_eq!(params.get_str("connection"), Some("other"));
    }

    #[test]
    fn unset_valued_option_is_absent() {
        let parser = OptionParser::new("db").add_option(InputOption::new("connection"));
        let (params, _) = parser.parse(&[]).unwrap();
        assert!(params.get("connection").is_none());
    }

    #[test]
    fn multiple_option_collects_list() {
        let parser = OptionParser::new("run").add_option(InputOption::new("only").multiple());
        let (params, _) = parser.parse(&argv(&["--only", "a", "--only", "b"])).unwrap();
        assert_eq!(
            params.get("only"),
            Some(&ParamValue::List(argv(&["a", "b"])))
        );
    }

    #[test]
    fn repeated_flag_is_accepted() {
        let (params, _) = OptionParser::new("build").parse(&argv(&["-v", "-v"])).unwrap();
        assert!(params.is_set("verbose"));
    }

    #[test]
    fn unknown_option_is_an_error() {
        let err = OptionParser::new("build").parse(&argv(&["--nope"])).unwrap_err();
        assert!(matches!(err, ShellError::OptionParse { .. }));
        assert!(err.to_string().contains("--nope"));
    }

    #[test]
    fn invalid_choice_is_an_error() {
        let err = report_parser().parse(&argv(&["--format", "xml"])).unwrap_err();
        assert!(matches!(err, ShellError::OptionParse { .. }));
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn declared_subcommand_is_consumed() {
        let (params, args) = report_parser().parse(&argv(&["daily", "today.csv"])).unwrap();
        assert_eq!(args, argv(&["today.csv"]));
        assert_eq!(params.get_str("format"), Some("csv"));
    }

    #[test]
    fn subcommand_with_parser_delegates() {
        let (params, args) = report_parser().parse(&argv(&["weekly", "-e"])).unwrap();
        assert!(params.is_set("email"));
        assert!(params.get("format").is_none());
        assert!(args.is_empty());
    }

    #[test]
    fn undeclared_first_token_stays_positional() {
        let (_, args) = OptionParser::new("build").parse(&argv(&["assets", "css"])).unwrap();
        assert_eq!(args, argv(&["assets", "css"]));
    }

    #[test]
    fn subcommand_tokens_are_skipped_later() {
        let (_, args) = report_parser().parse(&argv(&["x", "daily", "y"])).unwrap();
        assert_eq!(args, argv(&["x", "y"]));
    }

    #[test]
    fn declared_arguments_are_validated() {
        let parser = OptionParser::new("greet").add_argument(InputArgument::new("name").required());
        let (_, args) = parser.parse(&argv(&["ada"])).unwrap();
        assert_eq!(args, argv(&["ada"]));

        assert!(parser.parse(&[]).is_err());
        assert!(parser.parse(&argv(&["ada", "grace"])).is_err());
    }

    #[test]
    fn required_argument_waived_by_help() {
        let parser = OptionParser::new("greet").add_argument(InputArgument::new("name").required());
        let (params, args) = parser.parse(&argv(&["--help"])).unwrap();
        assert!(params.is_set("help"));
        assert!(args.is_empty());
    }

    #[test]
    fn argument_choices() {
        let parser = OptionParser::new("mode").add_argument(InputArgument::new("env").choices(&["dev", "prod"]));
        assert!(parser.parse(&argv(&["dev"])).is_ok());
        assert!(parser.parse(&argv(&["qa"])).is_err());
    }

    #[test]
    fn subcommands_are_listed() {
        assert_eq!(report_parser().subcommands(), vec!["daily", "weekly"]);
        assert!(report_parser().has_subcommand("weekly"));
        assert!(OptionParser::new("x").subcommands().is_empty());
    }

    #[test]
    fn text_help_lists_options_and_subcommands() {
        let help = report_parser().help(None, HelpFormat::Text);
        assert!(help.contains("taskshell report"));
        assert!(help.contains("--format"));
        assert!(help.contains("weekly"));
        assert!(help.contains("Last seven days"));
    }

    #[test]
    fn subcommand_help_uses_nested_parser() {
        let help = report_parser().help(Some("weekly"), HelpFormat::Text);
        assert!(help.contains("taskshell report weekly"));
        assert!(help.contains("--email"));
    }

    #[test]
    fn unknown_subcommand_help_suggests() {
        let help = report_parser().help(Some("weekyl"), HelpFormat::Text);
        assert!(help.contains("Unable to find the `taskshell report weekyl` subcommand"));
        assert!(help.contains("Did you mean"));
        assert!(help.contains("weekly"));
    }

    #[test]
    fn json_help_is_structured() {
        let help = report_parser().description("Reports").help(None, HelpFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&help).unwrap();
        assert_eq!(value["command"], "taskshell report");
        assert_eq!(value["description"], "Reports");
        assert_eq!(value["subcommands"][1]["name"], "weekly");
        assert!(value["options"]
            .as_array()
            .unwrap()
            .iter()
            .any(|o| o["name"] == "format"));
    }

    #[test]
    fn root_name_changes_display_name() {
        let mut parser = OptionParser::new("CommandList");
        parser.set_root_name("bin/app");
        assert_eq!(parser.display_name(), "bin/app command_list");
    }
}
