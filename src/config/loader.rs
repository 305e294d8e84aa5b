//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::ShellConfig;
use crate::error::{Result, ShellError};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TASKSHELL_CONFIG";

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = ".taskshell.yml";

/// Find the config file for `project_root`.
///
/// `$TASKSHELL_CONFIG` wins when set; otherwise `.taskshell.yml` in the
/// project root is used if it exists.
pub fn find_config(project_root: &Path) -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(path));
    }
    let path = project_root.join(CONFIG_FILE);
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigParse` if the file cannot be read or the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ShellConfig> {
    let content = fs::read_to_string(path).map_err(|e| ShellError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse config content.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ShellConfig> {
    if content.trim().is_empty() {
        return Ok(ShellConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| ShellError::ConfigParse {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the config for `project_root`, falling back to defaults when no
/// file exists.
pub fn load_config(project_root: &Path) -> Result<ShellConfig> {
    match find_config(project_root) {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        None => Ok(ShellConfig::default()),
    }
}
