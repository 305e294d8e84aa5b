//! Configuration loading for taskshell.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use taskshell::config::load_config_file;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join(".taskshell.yml");
//! fs::write(&path, "root_name: bin/app\ninteractive: false").unwrap();
//!
//! let config = load_config_file(&path).unwrap();
//! assert_eq!(config.root_name, Some("bin/app".to_string()));
//! assert!(!config.interactive);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{find_config, load_config, load_config_file, parse_config, CONFIG_ENV, CONFIG_FILE};
pub use schema::ShellConfig;

/// Check if running in a CI environment.
///
/// Used by `main()` to force non-interactive mode. Checks common CI
/// environment variables: `CI`, `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`,
/// `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}
