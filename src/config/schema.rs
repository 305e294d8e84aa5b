//! Configuration schema for `.taskshell.yml`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ui::OutputMode;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Program name shown in usage lines and the welcome banner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_name: Option<String>,

    /// Whether shells may prompt
    pub interactive: bool,

    /// Output level before any `--quiet`/`--verbose` flag applies
    pub default_output: OutputMode,

    /// Short token to full token, e.g. `st: migrations.status`
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: BTreeMap<String, String>,

    /// Alias each plugin shell under its bare name when unambiguous
    pub short_plugin_aliases: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            root_name: None,
            interactive: true,
            default_output: OutputMode::Normal,
            aliases: BTreeMap::new(),
            short_plugin_aliases: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: ShellConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, ShellConfig::default());
        assert!(config.interactive);
    }

    #[test]
    fn parses_all_fields() {
        let yaml = r#"
root_name: bin/app
interactive: false
default_output: verbose
aliases:
  st: migrations.status
short_plugin_aliases: true
"#;
        let config: ShellConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.root_name.as_deref(), Some("bin/app"));
        assert!(!config.interactive);
        assert_eq!(config.default_output, OutputMode::Verbose);
        assert_eq!(config.aliases["st"], "migrations.status");
        assert!(config.short_plugin_aliases);
    }

    #[test]
    fn rejects_unknown_output_mode() {
        assert!(serde_yaml::from_str::<ShellConfig>("default_output: loud").is_err());
    }
}
