//! Suite setup and teardown hooks.
//!
//! A [`SuiteHook`] prepares the world a test suite runs in. Two bootstraps
//! are provided:
//!
//! - [`UnitBootstrap`] installs the fixed unit-test environment and never
//!   spawns processes.
//! - [`EndToEndBootstrap`] applies schema migrations and tolerates their
//!   failure, reporting it through [`SetupReport::MigrationTolerated`] and an
//!   `error` log record rather than aborting the suite.

use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, error};

use super::environment::{DATABASE_URL, EnvironmentGuard, TestEnvironment};
use super::lifecycle::BootstrapError;
use super::migration::{
    CommandRunner, MigrationCommand, MigrationFailure, SystemCommandRunner, apply_migrations,
};
use crate::config::BootstrapConfig;

/// Hook invocation point.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Stage {
    /// Before any test runs.
    Setup,
    /// After every test has finished.
    Teardown,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Setup => "setup",
            Self::Teardown => "teardown",
        })
    }
}

/// What the lifecycle does when a hook overruns its budget.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TimeoutPolicy {
    /// The hook has no budget.
    Unbounded,
    /// Log the overrun and carry on.
    Tolerate,
    /// Fail the suite with [`BootstrapError::HookTimedOut`].
    #[default]
    Abort,
}

/// Time budget handed to a hook.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    started: Instant,
    budget: Option<Duration>,
}

impl Deadline {
    /// Deadline `budget` from now.
    #[must_use]
    pub fn after(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget: Some(budget),
        }
    }

    /// Deadline that never expires.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            started: Instant::now(),
            budget: None,
        }
    }

    /// Total budget, if bounded.
    #[must_use]
    pub const fn budget(&self) -> Option<Duration> {
        self.budget
    }

    /// Time since the deadline was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Time left, or `None` when unbounded. Saturates at zero.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.budget
            .map(|budget| budget.saturating_sub(self.elapsed()))
    }

    /// Returns `true` once a bounded deadline has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.budget.is_some_and(|budget| self.elapsed() > budget)
    }
}

/// Structured result of a setup hook.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SetupReport {
    /// The unit-test environment was installed.
    EnvironmentInstalled {
        /// Number of variables written.
        variables: usize,
    },
    /// Migrations ran to completion.
    Migrated,
    /// Migrations failed; the suite continues against the existing schema.
    MigrationTolerated(MigrationFailure),
    /// Migrations are disabled by configuration.
    MigrationSkipped,
}

impl SetupReport {
    /// Returns `true` when setup completed with a tolerated failure.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::MigrationTolerated(_))
    }
}

impl fmt::Display for SetupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnvironmentInstalled { variables } => {
                write!(f, "installed {variables} environment variables")
            }
            Self::Migrated => f.write_str("migrations applied"),
            Self::MigrationTolerated(failure) => write!(f, "{failure} (tolerated)"),
            Self::MigrationSkipped => f.write_str("migrations disabled"),
        }
    }
}

/// Setup and teardown for one test suite.
pub trait SuiteHook {
    /// Prepares the suite.
    ///
    /// The suite checks `deadline` only after this returns; it cannot
    /// interrupt a hook that blocks. Hooks doing unbounded work must bound it
    /// themselves, for example by passing [`Deadline::remaining`] to their
    /// own timeout as [`EndToEndBootstrap`] does.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError`] when the suite cannot run.
    fn setup(&mut self, deadline: Deadline) -> Result<SetupReport, BootstrapError>;

    /// Releases whatever setup acquired.
    ///
    /// As with [`Self::setup`], overruns are detected once this returns.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError`] when cleanup fails.
    fn teardown(&mut self, deadline: Deadline) -> Result<(), BootstrapError>;

    /// Reaction to an overrun at `stage`.
    fn timeout_policy(&self, _stage: Stage) -> TimeoutPolicy {
        TimeoutPolicy::Abort
    }
}

/// Installs the unit-test environment.
#[derive(Debug)]
pub struct UnitBootstrap {
    environment: TestEnvironment,
    guard: Option<EnvironmentGuard>,
}

impl UnitBootstrap {
    /// Bootstrap installing `environment`.
    #[must_use]
    pub fn new(environment: TestEnvironment) -> Self {
        Self {
            environment,
            guard: None,
        }
    }

    /// Bootstrap installing the unit defaults plus configured overrides.
    #[must_use]
    pub fn from_config(config: &BootstrapConfig) -> Self {
        Self::new(TestEnvironment::from_config(config))
    }

    /// Snapshot this bootstrap installs.
    #[must_use]
    pub fn environment(&self) -> &TestEnvironment {
        &self.environment
    }

    /// Installs the environment for the rest of the process.
    ///
    /// Unlike [`SuiteHook::setup`] nothing is restored afterwards.
    #[must_use]
    pub fn install_for_process(self) -> SetupReport {
        let guard = self.environment.install();
        let variables = guard.len();
        guard.keep();
        SetupReport::EnvironmentInstalled { variables }
    }
}

impl SuiteHook for UnitBootstrap {
    fn setup(&mut self, _deadline: Deadline) -> Result<SetupReport, BootstrapError> {
        let guard = self.environment.install();
        let variables = guard.len();
        self.guard = Some(guard);
        Ok(SetupReport::EnvironmentInstalled { variables })
    }

    fn teardown(&mut self, _deadline: Deadline) -> Result<(), BootstrapError> {
        if self.guard.take().is_some() {
            debug!("restored the environment captured before setup");
        }
        Ok(())
    }

    fn timeout_policy(&self, _stage: Stage) -> TimeoutPolicy {
        TimeoutPolicy::Unbounded
    }
}

impl Default for UnitBootstrap {
    fn default() -> Self {
        Self::new(TestEnvironment::unit_defaults())
    }
}

/// Applies migrations before an end-to-end suite.
#[derive(Debug)]
pub struct EndToEndBootstrap<R = SystemCommandRunner> {
    runner: R,
    command: MigrationCommand,
    enabled: bool,
}

impl EndToEndBootstrap<SystemCommandRunner> {
    /// Bootstrap running real child processes.
    #[must_use]
    pub fn new(config: &BootstrapConfig) -> Self {
        Self::with_runner(config, SystemCommandRunner)
    }
}

impl<R: CommandRunner> EndToEndBootstrap<R> {
    /// Bootstrap delegating process execution to `runner`.
    ///
    /// The command receives the datastore URL from the test environment and
    /// every `[environment]` override from `config`.
    #[must_use]
    pub fn with_runner(config: &BootstrapConfig, runner: R) -> Self {
        let environment = TestEnvironment::from_config(config);
        let mut command = MigrationCommand::from_config(&config.migration);
        if let Some(url) = environment.database_url() {
            command = command.env(DATABASE_URL, url);
        }
        for (key, value) in &config.environment {
            command = command.env(key.clone(), value.clone());
        }

        Self {
            runner,
            command,
            enabled: config.migration.enabled,
        }
    }

    /// Command run during setup.
    #[must_use]
    pub fn command(&self) -> &MigrationCommand {
        &self.command
    }

    /// Process runner.
    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }
}

impl<R: CommandRunner> SuiteHook for EndToEndBootstrap<R> {
    fn setup(&mut self, deadline: Deadline) -> Result<SetupReport, BootstrapError> {
        if !self.enabled {
            debug!("migrations disabled; skipping `{}`", self.command);
            return Ok(SetupReport::MigrationSkipped);
        }

        match apply_migrations(&self.runner, &self.command, deadline.remaining()) {
            Ok(_) => Ok(SetupReport::Migrated),
            Err(failure) => {
                error!("{failure}; continuing with the existing schema");
                Ok(SetupReport::MigrationTolerated(failure))
            }
        }
    }

    fn teardown(&mut self, _deadline: Deadline) -> Result<(), BootstrapError> {
        debug!("end-to-end teardown has nothing to release");
        Ok(())
    }

    fn timeout_policy(&self, stage: Stage) -> TimeoutPolicy {
        match stage {
            Stage::Setup => TimeoutPolicy::Tolerate,
            Stage::Teardown => TimeoutPolicy::Abort,
        }
    }
}
