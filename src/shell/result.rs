//! Uniform result of running a command.

/// Result of command execution.
///
/// Handlers may finish with nothing, a boolean or an integer code; all three
/// convert into a `CommandResult` so the dispatcher sees one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

impl Default for CommandResult {
    fn default() -> Self {
        Self::success()
    }
}

impl From<()> for CommandResult {
    fn from(_: ()) -> Self {
        Self::success()
    }
}

impl From<bool> for CommandResult {
    fn from(ok: bool) -> Self {
        if ok {
            Self::success()
        } else {
            Self::failure(1)
        }
    }
}

impl From<i32> for CommandResult {
    fn from(code: i32) -> Self {
        if code == 0 {
            Self::success()
        } else {
            Self::failure(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn unit_is_success() {
        assert_eq!(CommandResult::from(()), CommandResult::success());
    }

    #[test]
    fn bools_normalize() {
        assert_eq!(CommandResult::from(true).exit_code, 0);
        assert_eq!(CommandResult::from(false).exit_code, 1);
    }

    #[test]
    fn integers_pass_through() {
        assert_eq!(CommandResult::from(0), CommandResult::success());
        assert_eq!(CommandResult::from(3).exit_code, 3);
        assert!(!CommandResult::from(3).success);
    }
}
