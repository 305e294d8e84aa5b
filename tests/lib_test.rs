//! Library integration tests.

use taskshell::error::StopSignal;
use taskshell::ShellError;

#[test]
fn error_types_are_public() {
    let err = ShellError::CommandNotFound {
        name: "test".into(),
    };
    assert!(err.to_string().contains("test"));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn stop_signals_carry_codes() {
    let err: ShellError = StopSignal::Abort {
        message: "boom".into(),
        code: 42,
    }
    .into();
    assert!(err.is_stop());
    assert_eq!(err.exit_code(), 42);
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> taskshell::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn option_types_are_public() {
    use taskshell::options::{InputOption, OptionParser};

    let parser = OptionParser::new("deploy").add_option(InputOption::flag("force").short('f'));
    let (params, args) = parser
        .parse(&["-f".to_string(), "production".to_string()])
        .unwrap();
    assert!(params.is_set("force"));
    assert_eq!(args, vec!["production".to_string()]);
}

#[test]
fn naming_helpers_are_public() {
    use taskshell::naming::{camelize, class_key, underscore};

    assert_eq!(camelize("report_weekly"), "ReportWeekly");
    assert_eq!(underscore("ReportWeekly"), "report_weekly");
    assert_eq!(class_key("migrations.status", "Shell"), "Migrations.StatusShell");
}
