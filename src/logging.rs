//! Tracing setup with a log level that follows the console output mode.
//!
//! The filter is installed behind a `reload` layer so that `--quiet` and
//! `--verbose` parsed by a shell can change what gets logged after startup.

use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

use crate::ui::OutputMode;

/// Environment variable that forces debug logging.
pub const DEBUG_ENV: &str = "TASKSHELL_DEBUG";

/// Handle for changing the active log filter.
#[derive(Clone)]
pub struct LogControl {
    handle: reload::Handle<EnvFilter, Registry>,
    pinned: bool,
}

impl std::fmt::Debug for LogControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogControl")
            .field("pinned", &self.pinned)
            .field("directive", &self.current_directive())
            .finish()
    }
}

impl LogControl {
    /// Wrap a reload handle.
    ///
    /// A pinned control ignores `apply`, used when the user chose the
    /// filter explicitly through `RUST_LOG` or the debug switch.
    pub fn new(handle: reload::Handle<EnvFilter, Registry>, pinned: bool) -> Self {
        Self { handle, pinned }
    }

    /// Swap the filter to match `mode`.
    pub fn apply(&self, mode: OutputMode) {
        if self.pinned {
            return;
        }
        let filter = EnvFilter::new(format!("taskshell={}", mode.log_directive()));
        if let Err(e) = self.handle.reload(filter) {
            tracing::warn!("Could not change log level: {}", e);
        }
    }

    /// The active filter, rendered as a directive string.
    pub fn current_directive(&self) -> Option<String> {
        self.handle.with_current(|f| f.to_string()).ok()
    }
}

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `TASKSHELL_DEBUG` set to anything sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN, later adjusted by `--quiet` / `--verbose`
pub fn init_tracing() -> LogControl {
    let debug = std::env::var_os(DEBUG_ENV).is_some();
    let from_env = EnvFilter::try_from_default_env().ok();
    let pinned = debug || from_env.is_some();

    let filter = if debug {
        EnvFilter::new("taskshell=debug")
    } else {
        from_env.unwrap_or_else(|| EnvFilter::new("taskshell=warn"))
    };

    let (filter_layer, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    LogControl::new(handle, pinned)
}
