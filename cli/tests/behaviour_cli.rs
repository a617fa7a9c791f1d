//! End-to-end behaviour tests for the `stockroom` binary.
//!
//! Each scenario runs the binary inside a scratch directory so that
//! `stockroom.toml` discovery only sees files the scenario wrote.

use std::cell::RefCell;
use std::convert::Infallible;
use std::process::{Command, Output};
use std::str::FromStr;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

struct CliWorld {
    dir: TempDir,
    output: RefCell<Option<Output>>,
}

impl CliWorld {
    fn write_config(&self, text: &str) {
        std::fs::write(self.dir.path().join("stockroom.toml"), text)
            .expect("configuration should be written");
    }

    fn output(&self) -> Output {
        self.output
            .borrow()
            .clone()
            .expect("the command should have run")
    }
}

#[derive(Debug)]
struct Quoted(String);

impl FromStr for Quoted {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(Self(input.trim().trim_matches('"').to_owned()))
    }
}

#[fixture]
fn cli_world() -> CliWorld {
    CliWorld {
        dir: tempfile::tempdir().expect("temporary directory should be created"),
        output: RefCell::new(None),
    }
}

#[given("a configuration whose migration program is missing")]
fn missing_program(cli_world: &CliWorld) {
    cli_world.write_config(concat!(
        "[migration]\n",
        "program = \"stockroom-missing-migrator\"\n",
        "args = []\n",
    ));
}

#[given("a configuration containing {text}")]
fn configuration_text(cli_world: &CliWorld, text: Quoted) {
    cli_world.write_config(&format!("{}\n", text.0));
}

#[given("a configuration that sets the variable {key} to {value}")]
fn configuration_variable(cli_world: &CliWorld, key: Quoted, value: Quoted) {
    cli_world.write_config(&format!("[environment]\n\"{}\" = \"{}\"\n", key.0, value.0));
}

#[when("I run stockroom {args}")]
fn run_binary(cli_world: &CliWorld, args: String) {
    let output = Command::new(env!("CARGO_BIN_EXE_stockroom"))
        .args(args.split_whitespace())
        .current_dir(cli_world.dir.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("the binary should launch");
    cli_world.output.borrow_mut().replace(output);
}

#[then("the command exits with status {code}")]
fn exit_status(cli_world: &CliWorld, code: i32) {
    let output = cli_world.output();
    assert_eq!(
        output.status.code(),
        Some(code),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[then("stdout is {expected}")]
fn stdout_is(cli_world: &CliWorld, expected: Quoted) {
    let stdout = String::from_utf8_lossy(&cli_world.output().stdout).into_owned();
    assert_eq!(stdout.trim_end(), expected.0);
}

#[then("stdout contains {snippet}")]
fn stdout_contains(cli_world: &CliWorld, snippet: Quoted) {
    let stdout = String::from_utf8_lossy(&cli_world.output().stdout).into_owned();
    assert!(stdout.contains(&snippet.0), "stdout was: {stdout}");
}

#[then("stderr contains {snippet}")]
fn stderr_contains(cli_world: &CliWorld, snippet: Quoted) {
    let stderr = String::from_utf8_lossy(&cli_world.output().stderr).into_owned();
    assert!(stderr.contains(&snippet.0), "stderr was: {stderr}");
}

#[scenario(path = "tests/features/cli.feature", index = 0)]
fn scenario_merge(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(path = "tests/features/cli.feature", index = 1)]
fn scenario_env_fish(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(path = "tests/features/cli.feature", index = 2)]
fn scenario_tolerated_migration(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(path = "tests/features/cli.feature", index = 3)]
fn scenario_strict_migration(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(path = "tests/features/cli.feature", index = 4)]
fn scenario_invalid_configuration(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(path = "tests/features/cli.feature", index = 5)]
fn scenario_invalid_variable_name(cli_world: CliWorld) {
    let _ = cli_world;
}
