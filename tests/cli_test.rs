//! End-to-end tests for command dispatch

use std::fs;

use clap::Parser;
use tempfile::TempDir;

use rbset::cli::commands::execute_command;
use rbset::cli::Cli;
use rbset::exitcode;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).expect("valid arguments")
}

#[test]
fn given_script_and_output_when_run_then_results_written() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in.txt");
    let output = temp.path().join("out.txt");
    fs::write(&input, "Integer\ninsert:10\ninsert:20\ninsert:30\nprinttree\n").unwrap();

    let cli = parse(&[
        "rbset",
        "run",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--verify",
    ]);
    execute_command(&cli).expect("run succeeds");

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "True\nTrue\nTrue\n20 *10 *30\n"
    );
}

#[test]
fn given_missing_input_when_run_then_noinput_exit_code() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("missing.txt");
    let output = temp.path().join("out.txt");

    let cli = parse(&[
        "rbset",
        "run",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
    ]);
    let err = execute_command(&cli).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
    assert!(!output.exists());
}

#[test]
fn given_output_in_missing_directory_when_run_then_cantcreat_exit_code() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in.txt");
    fs::write(&input, "String insert:a").unwrap();
    let output = temp.path().join("no/such/dir/out.txt");

    let cli = parse(&[
        "rbset",
        "run",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
    ]);
    let err = execute_command(&cli).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::CANTCREAT);
}

#[test]
fn given_same_input_and_output_when_run_then_usage_error() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in.txt");
    fs::write(&input, "Integer insert:1").unwrap();
    let path = input.to_str().unwrap();

    let err = execute_command(&parse(&["rbset", "run", path, path])).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::USAGE);
    assert_eq!(fs::read_to_string(&input).unwrap(), "Integer insert:1");
}

#[test]
fn given_bad_explicit_config_when_any_command_then_config_exit_code() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in.txt");
    fs::write(&input, "Integer insert:1").unwrap();
    let config = temp.path().join("missing.toml");

    let cli = parse(&[
        "rbset",
        "--config",
        config.to_str().unwrap(),
        "show",
        input.to_str().unwrap(),
    ]);
    let err = execute_command(&cli).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::CONFIG);
}
