//! Integration tests for the taskshell binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn taskshell(dir: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("taskshell"));
    cmd.current_dir(dir.path())
        .env_remove("TASKSHELL_CONFIG")
        .env_remove("TASKSHELL_DEBUG")
        .env_remove("RUST_LOG");
    cmd
}

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".taskshell.yml"), config).unwrap();
    temp
}

#[test]
fn cli_no_args_lists_commands() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    taskshell(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("Available Shells"))
        .stdout(predicate::str::contains("[CORE] command_list, completion"));
    Ok(())
}

#[test]
fn cli_help_lists_commands() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    taskshell(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available Shells"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    taskshell(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .stdout(predicate::str::contains("Available Shells").not());
    Ok(())
}

#[test]
fn cli_unknown_command_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    taskshell(&temp)
        .arg("unknown-thing")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Shell class for \"unknown-thing\" could not be found.",
        ));
    Ok(())
}

#[test]
fn cli_unknown_option_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    taskshell(&temp)
        .args(["command_list", "--bogus"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("--bogus"));
    Ok(())
}

#[test]
fn cli_shell_help() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    taskshell(&temp)
        .args(["completion", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("taskshell completion"))
        .stdout(predicate::str::contains("subcommands"));
    Ok(())
}

#[test]
fn cli_json_help() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let output = taskshell(&temp)
        .args(["completion", "json", "--help"])
        .output()?;
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["command"], "taskshell completion");
    Ok(())
}

#[test]
fn cli_json_listing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let output = taskshell(&temp)
        .args(["command_list", "--format", "json"])
        .output()?;
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["shells"]["CORE"][1], "completion");
    Ok(())
}

#[test]
fn cli_completion_commands() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    taskshell(&temp)
        .args(["completion", "commands"])
        .assert()
        .success()
        .stdout("command_list completion\n");
    Ok(())
}

#[test]
fn cli_completion_script() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    taskshell(&temp)
        .args(["completion", "script", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete"));
    Ok(())
}

#[test]
fn cli_config_alias() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("aliases:\n  ls: command_list\n");
    taskshell(&temp)
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("ls -> command_list"));
    Ok(())
}

#[test]
fn cli_config_root_name() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("root_name: bin/app\n");
    taskshell(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to bin/app"))
        .stdout(predicate::str::contains("`bin/app shell_name [args]`"));
    Ok(())
}

#[test]
fn cli_config_env_override() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let path = temp.path().join("custom.yml");
    fs::write(&path, "default_output: quiet\n")?;
    taskshell(&temp)
        .env("TASKSHELL_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn cli_malformed_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("aliases: [unclosed");
    taskshell(&temp)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}
