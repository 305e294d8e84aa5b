//! Error types for shell dispatch.
//!
//! This module defines [`ShellError`], the error type used throughout the
//! engine, the [`StopSignal`] control-flow values carried inside it, and a
//! [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Option parse errors are recovered by the shell that parsed them
//! - Lookup and configuration errors propagate to the dispatcher
//! - `Stop` is not a failure of the engine: it unwinds a command on purpose
//!   and carries the exit code the process should end with

use std::path::PathBuf;
use thiserror::Error;

/// Explicit early termination of a running command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopSignal {
    /// Error-styled termination. The message has already been written.
    Abort { message: String, code: i32 },
    /// Graceful termination without output.
    Halt { code: i32 },
}

impl StopSignal {
    /// Exit code carried by the signal.
    pub fn code(&self) -> i32 {
        match self {
            Self::Abort { code, .. } | Self::Halt { code } => *code,
        }
    }
}

impl std::fmt::Display for StopSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Abort { message, code } => write!(f, "aborted ({}): {}", code, message),
            Self::Halt { code } => write!(f, "halted ({})", code),
        }
    }
}

/// Core error type for shell operations.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Malformed options or arguments.
    #[error("{message}")]
    OptionParse { message: String },

    /// No shell is registered under the requested name.
    #[error("Shell class for \"{name}\" could not be found.")]
    CommandNotFound { name: String },

    /// A declared task has no registered implementation.
    #[error("Task `{task}` not found. Maybe you made a typo or a plugin is missing or not loaded?")]
    MissingTask { task: String },

    /// A shell listed a method but did not handle it in `call`.
    #[error("Method `{method}` is not implemented by shell `{shell}`")]
    MissingMethod { shell: String, method: String },

    /// Failed to parse the configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// A prompt could not be answered.
    #[error("Prompt failed: {message}")]
    Prompt { message: String },

    /// Abort or halt raised by a command.
    #[error("{0}")]
    Stop(StopSignal),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShellError {
    /// Exit code the dispatcher reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Stop(signal) => signal.code(),
            _ => 1,
        }
    }

    /// Whether this error is an abort/halt signal rather than a failure.
    pub fn is_stop(&self) -> bool {
        matches!(self, Self::Stop(_))
    }
}

impl From<StopSignal> for ShellError {
    fn from(signal: StopSignal) -> Self {
        Self::Stop(signal)
    }
}

/// Result type alias for shell operations.
pub type Result<T> = std::result::Result<T, ShellError>;
