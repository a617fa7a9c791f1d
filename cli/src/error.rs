//! Errors reported by the `stockroom` binary.
//!
//! Each variant maps to a process exit status through
//! [`CliError::exit_code`]: `1` when the requested work ran and failed, `2`
//! when it could not run at all.

use std::io;

use stockroom::{BootstrapError, ConfigError, EnvironmentError, MigrationFailure};
use thiserror::Error;

/// Errors that can occur while running a subcommand.
#[derive(Debug, Error)]
pub enum CliError {
    /// The `--json` argument is not valid JSON.
    #[error("invalid --json input: {source}")]
    InvalidJson {
        /// Parser diagnostic.
        source: serde_json::Error,
    },

    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The configured environment holds unusable values.
    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    /// The suite lifecycle failed.
    #[error(transparent)]
    Bootstrap(Box<BootstrapError>),

    /// The migration failed and `--strict` was requested.
    #[error("{0}")]
    MigrationFailed(MigrationFailure),

    /// Writing to standard output failed.
    #[error("failed to write output: {source}")]
    Output {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },
}

impl CliError {
    /// Process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::MigrationFailed(_) | Self::Output { .. } => 1,
            Self::InvalidJson { .. }
            | Self::Config(_)
            | Self::Environment(_)
            | Self::Bootstrap(_) => 2,
        }
    }
}

impl From<BootstrapError> for CliError {
    fn from(error: BootstrapError) -> Self {
        Self::Bootstrap(Box::new(error))
    }
}

/// Convenience alias for CLI results.
pub type Result<T> = std::result::Result<T, CliError>;
