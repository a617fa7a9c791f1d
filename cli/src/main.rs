//! `stockroom` command-line entrypoint.
//!
//! Merges style classes, prints the unit-test environment as shell exports,
//! and runs the end-to-end migration bootstrap for CI pipelines.

use std::io::Write;

use clap::Parser;
use env_logger::Env;
use stockroom_cli::cli::Cli;
use stockroom_cli::commands::run;
use stockroom_cli::error::Result;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr();
    let exit_code = exit_code_for_run_result(run(&cli, &mut stdout), &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Logs go to standard error; `RUST_LOG` overrides the verbosity flags.
fn init_logging(cli: &Cli) {
    let env = Env::default().default_filter_or(cli.log_level().as_str());
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .init();
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            if writeln!(stderr, "stockroom: {err}").is_err() {
                // Nothing left to report to.
            }
            err.exit_code()
        }
    }
}
