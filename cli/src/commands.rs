//! Subcommand execution.
//!
//! Results go to the supplied writer; progress and diagnostics go through
//! the `log` facade so that `-v` and `RUST_LOG` control them.

use std::io::Write;

use camino::Utf8Path;
use log::{debug, info};
use serde_json::Value;
use stockroom::{
    BootstrapConfig, CommandRunner, EndToEndBootstrap, SetupReport, Suite, SuiteTimeouts,
    SystemCommandRunner, TestEnvironment,
};
use stockroom_common::{ClassInput, ClassMerger};

use crate::cli::{Cli, Command, EnvArgs, MergeArgs, MigrateArgs};
use crate::error::{CliError, Result};
use crate::output::export_script;

/// Runs the parsed command, writing results to `stdout`.
///
/// # Errors
///
/// Returns [`CliError`] when the command fails; see
/// [`CliError::exit_code`] for the matching exit status.
pub fn run(cli: &Cli, stdout: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Command::Merge(args) => merge(args, stdout),
        Command::Env(args) => env(args, stdout),
        Command::Migrate(args) => migrate(args, SystemCommandRunner, stdout),
    }
}

/// Prints the merged class string.
///
/// # Errors
///
/// Returns [`CliError::InvalidJson`] for malformed `--json` input.
pub fn merge(args: &MergeArgs, stdout: &mut dyn Write) -> Result<()> {
    let parsed: Option<Value> = args
        .json
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .map_err(|source| CliError::InvalidJson { source })?;

    let mut inputs: Vec<ClassInput<'_>> = args.classes.iter().map(ClassInput::from).collect();
    inputs.extend(parsed.as_ref().map(ClassInput::from));

    let merged = ClassMerger::default().resolve(&inputs);
    writeln!(stdout, "{merged}")?;
    Ok(())
}

/// Prints export lines for the unit-test environment.
///
/// # Errors
///
/// Returns [`CliError`] when the configuration cannot be loaded or the
/// resulting environment is invalid.
pub fn env(args: &EnvArgs, stdout: &mut dyn Write) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let environment = TestEnvironment::from_config(&config);
    environment.validate()?;

    for line in export_script(args.shell, &environment) {
        writeln!(stdout, "{line}")?;
    }
    Ok(())
}

/// Runs the end-to-end setup and teardown once through `runner`.
///
/// A failed migration is reported and tolerated unless `--strict` is set.
///
/// # Errors
///
/// Returns [`CliError::MigrationFailed`] in strict mode, or the
/// configuration and lifecycle errors otherwise.
pub fn migrate<R: CommandRunner>(
    args: &MigrateArgs,
    runner: R,
    stdout: &mut dyn Write,
) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(secs) = args.timeout {
        config.timeouts.setup_secs = secs;
    }

    let hook = EndToEndBootstrap::with_runner(&config, runner);
    info!("running `{}`", hook.command());
    let mut suite = Suite::new(hook, SuiteTimeouts::from(&config.timeouts));
    let report = suite.begin()?.clone();
    suite.finish()?;

    writeln!(stdout, "{report}")?;
    match report {
        SetupReport::MigrationTolerated(failure) if args.strict => {
            Err(CliError::MigrationFailed(failure))
        }
        _ => Ok(()),
    }
}

fn load_config(path: Option<&Utf8Path>) -> Result<BootstrapConfig> {
    let config = match path {
        Some(file) => BootstrapConfig::load_from(file)?,
        None => BootstrapConfig::load(Utf8Path::new("."))?,
    };
    debug!("configuration: {config:?}");
    Ok(config)
}
