//! Output verbosity levels.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output verbosity mode.
///
/// Ordered from least to most output, so a message written at level `L`
/// is shown when `L <= current mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Only messages explicitly written at quiet level, plus errors.
    Quiet,
    /// Regular status output.
    #[default]
    Normal,
    /// Everything, including diagnostic detail.
    Verbose,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl OutputMode {
    /// Check if a message written at `level` is shown in this mode.
    pub fn shows(&self, level: OutputMode) -> bool {
        level <= *self
    }

    /// Tracing filter directive matching this mode.
    pub fn log_directive(&self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
        }
    }
}
