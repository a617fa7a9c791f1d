//! Command-line argument definitions.

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::LevelFilter;

/// Merge style classes and drive the Stockroom test bootstrap.
#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(version, about)]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Merge conflicting utilities:\n",
    "    $ stockroom merge 'px-2 py-1' p-3\n\n",
    "  Load the unit-test environment into a bash session:\n",
    "    $ eval \"$(stockroom env)\"\n\n",
    "  Apply migrations before end-to-end tests, failing on errors:\n",
    "    $ stockroom migrate --strict",
))]
pub struct Cli {
    /// Increase log verbosity (-v for info, -vv for debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is unset.
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the merged form of the given classes.
    Merge(MergeArgs),
    /// Print export lines for the unit-test environment.
    Env(EnvArgs),
    /// Run the end-to-end setup and teardown once.
    Migrate(MigrateArgs),
}

/// Arguments for `stockroom merge`.
#[derive(Parser, Debug, Clone, Default)]
pub struct MergeArgs {
    /// Class strings, merged left to right.
    #[arg(value_name = "CLASS")]
    pub classes: Vec<String>,

    /// Extra input as JSON: strings, arrays, booleans, null, or objects
    /// mapping class names to booleans. Applied after the positional classes.
    #[arg(long, value_name = "JSON")]
    pub json: Option<String>,
}

/// Arguments for `stockroom env`.
#[derive(Parser, Debug, Clone, Default)]
pub struct EnvArgs {
    /// Shell syntax for the export lines.
    #[arg(long, value_enum, default_value_t = Shell::Bash)]
    pub shell: Shell,

    /// Configuration file [default: ./stockroom.toml when present].
    #[arg(long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,
}

/// Arguments for `stockroom migrate`.
#[derive(Parser, Debug, Clone, Default)]
pub struct MigrateArgs {
    /// Configuration file [default: ./stockroom.toml when present].
    #[arg(long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Setup budget in seconds, replacing the configured value.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Exit with status 1 when the migration fails instead of tolerating it.
    #[arg(long)]
    pub strict: bool,
}

/// Shells supported by `stockroom env`.
#[derive(ValueEnum, Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Shell {
    /// bash and zsh.
    #[default]
    Bash,
    /// fish.
    Fish,
    /// PowerShell.
    Powershell,
}
