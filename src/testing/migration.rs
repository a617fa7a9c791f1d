//! Schema migration commands for end-to-end suites.
//!
//! The migration tool is an external process. [`CommandRunner`] is the seam
//! between the bootstrap and the operating system: [`SystemCommandRunner`]
//! spawns real children under a deadline, while tests substitute a mock or
//! the scripted runner from the `test-support` feature.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Read};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use thiserror::Error;
use wait_timeout::ChildExt;

use crate::config::MigrationConfig;

/// Errors raised while running a child process.
#[derive(Debug, Error)]
pub enum RunError {
    /// The program could not be started.
    #[error("failed to launch {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Operating system error.
        source: io::Error,
    },
    /// Waiting for the child or collecting its output failed.
    #[error("failed to wait for {program}: {source}")]
    Wait {
        /// Program being awaited.
        program: String,
        /// Operating system error.
        source: io::Error,
    },
    /// The child outlived its budget and was killed.
    #[error("{program} did not finish within {} seconds", .timeout.as_secs())]
    TimedOut {
        /// Program that was killed.
        program: String,
        /// Budget it exceeded.
        timeout: Duration,
    },
}

/// A fully specified migration invocation.
///
/// ```
/// use stockroom::testing::migration::MigrationCommand;
///
/// let command = MigrationCommand::new("dbmate").arg("up");
/// assert_eq!(command.to_string(), "dbmate up");
/// assert_eq!(MigrationCommand::default().to_string(), "sqlx migrate run");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MigrationCommand {
    program: String,
    args: Vec<String>,
    working_dir: Option<Utf8PathBuf>,
    envs: BTreeMap<String, String>,
}

impl MigrationCommand {
    /// Command running `program` with no arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            envs: BTreeMap::new(),
        }
    }

    /// Command described by the `[migration]` configuration table.
    #[must_use]
    pub fn from_config(config: &MigrationConfig) -> Self {
        let mut command = Self::new(config.program.clone()).args(config.args.iter().cloned());
        command.working_dir.clone_from(&config.working_dir);
        command
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Runs the command inside `dir`.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Adds a variable on top of the inherited environment.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.insert(key.into(), value.into());
        self
    }

    /// Program name.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments in order.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Working directory, if one was set.
    #[must_use]
    pub fn working_dir(&self) -> Option<&Utf8Path> {
        self.working_dir.as_deref()
    }

    /// Value of an extra variable.
    #[must_use]
    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.envs.get(key).map(String::as_str)
    }

    fn to_process(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .envs(&self.envs)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir.as_std_path());
        }
        command
    }
}

impl Default for MigrationCommand {
    fn default() -> Self {
        Self::from_config(&MigrationConfig::default())
    }
}

impl fmt::Display for MigrationCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Exit status and captured streams of a finished child.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommandOutput {
    /// Exit code; `None` when the child was ended by a signal.
    pub code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl CommandOutput {
    /// Output of a child that exited with `code`.
    #[must_use]
    pub fn exited(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Self::default()
        }
    }

    /// Attaches captured standard error.
    #[must_use]
    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    /// Returns `true` when the child exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Abstraction for running external commands.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Runs `command` to completion, killing it after `timeout` when set.
    ///
    /// # Errors
    ///
    /// Returns [`RunError`] when the child cannot be started, awaited, or
    /// finished in time. A non-zero exit is reported through
    /// [`CommandOutput`], not as an error.
    fn run(
        &self,
        command: &MigrationCommand,
        timeout: Option<Duration>,
    ) -> Result<CommandOutput, RunError>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(
        &self,
        command: &MigrationCommand,
        timeout: Option<Duration>,
    ) -> Result<CommandOutput, RunError> {
        (**self).run(command, timeout)
    }
}

/// Runs commands as real child processes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(
        &self,
        command: &MigrationCommand,
        timeout: Option<Duration>,
    ) -> Result<CommandOutput, RunError> {
        let program = command.program().to_owned();
        let mut child = command
            .to_process()
            .spawn()
            .map_err(|source| RunError::Spawn {
                program: program.clone(),
                source,
            })?;

        // Drain both pipes while waiting so a chatty child cannot block on a
        // full pipe buffer.
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let waited = match timeout {
            Some(limit) => child.wait_timeout(limit),
            None => child.wait().map(Some),
        };
        let status = match waited {
            Ok(Some(status)) => status,
            Ok(None) => {
                stop(&mut child, &program);
                return Err(RunError::TimedOut {
                    program,
                    timeout: timeout.unwrap_or_default(),
                });
            }
            Err(source) => {
                stop(&mut child, &program);
                return Err(RunError::Wait { program, source });
            }
        };

        let collect = |handle: Option<JoinHandle<io::Result<String>>>| match handle {
            Some(handle) => handle
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("output reader panicked"))),
            None => Ok(String::new()),
        };
        let stdout = collect(stdout).map_err(|source| RunError::Wait {
            program: program.clone(),
            source,
        })?;
        let stderr = collect(stderr).map_err(|source| RunError::Wait {
            program: program.clone(),
            source,
        })?;

        debug!("{program} exited with {status}");
        Ok(CommandOutput {
            code: status.code(),
            stdout,
            stderr,
        })
    }
}

fn stop(child: &mut Child, program: &str) {
    if let Err(error) = child.kill() {
        debug!("failed to kill {program}: {error}");
    }
    if let Err(error) = child.wait() {
        debug!("failed to reap {program}: {error}");
    }
}

fn drain<R>(mut pipe: R) -> JoinHandle<io::Result<String>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buffer = Vec::new();
        pipe.read_to_end(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    })
}

/// Why a migration did not complete.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FailureCause {
    /// The command could not be started or awaited.
    Launch {
        /// Operating system detail.
        detail: String,
    },
    /// The command ran but reported failure.
    Exited {
        /// Exit code; `None` when ended by a signal.
        code: Option<i32>,
        /// Trimmed standard error.
        stderr: String,
    },
    /// The command exceeded the setup budget and was killed.
    TimedOut {
        /// Budget it exceeded.
        timeout: Duration,
    },
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Launch { detail } => write!(f, "could not run: {detail}"),
            Self::Exited { code: Some(code), stderr } if stderr.is_empty() => {
                write!(f, "exited with status {code}")
            }
            Self::Exited { code: Some(code), stderr } => {
                write!(f, "exited with status {code}: {stderr}")
            }
            Self::Exited { code: None, stderr } if stderr.is_empty() => {
                f.write_str("terminated by a signal")
            }
            Self::Exited { code: None, stderr } => write!(f, "terminated by a signal: {stderr}"),
            Self::TimedOut { timeout } => {
                write!(f, "timed out after {} seconds", timeout.as_secs())
            }
        }
    }
}

/// A migration failure kept as a value so that callers may tolerate it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MigrationFailure {
    /// Rendered command line.
    pub command: String,
    /// Underlying cause.
    pub cause: FailureCause,
}

impl fmt::Display for MigrationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "migration `{}` {}", self.command, self.cause)
    }
}

impl MigrationFailure {
    fn from_run_error(command: &MigrationCommand, error: RunError) -> Self {
        let cause = match error {
            RunError::TimedOut { timeout, .. } => FailureCause::TimedOut { timeout },
            other @ (RunError::Spawn { .. } | RunError::Wait { .. }) => FailureCause::Launch {
                detail: other.to_string(),
            },
        };
        Self {
            command: command.to_string(),
            cause,
        }
    }
}

/// Runs `command` once and classifies the result.
///
/// Nothing is logged here beyond `debug` progress; callers decide whether a
/// failure is fatal.
///
/// # Errors
///
/// Returns a [`MigrationFailure`] when the command cannot run, exits with a
/// non-zero status, or exceeds `timeout`.
pub fn apply_migrations(
    runner: &dyn CommandRunner,
    command: &MigrationCommand,
    timeout: Option<Duration>,
) -> Result<CommandOutput, MigrationFailure> {
    debug!("running migrations with `{command}`");
    let output = runner
        .run(command, timeout)
        .map_err(|error| MigrationFailure::from_run_error(command, error))?;

    if output.success() {
        debug!("migrations applied");
        return Ok(output);
    }

    Err(MigrationFailure {
        command: command.to_string(),
        cause: FailureCause::Exited {
            code: output.code,
            stderr: output.stderr.trim().to_owned(),
        },
    })
}
