//! Suite lifecycle: setup, tests, teardown.
//!
//! [`Suite`] drives a [`SuiteHook`] through a fixed sequence of phases and
//! applies the hook's [`TimeoutPolicy`] when a stage overruns its budget.
//!
//! ```text
//! NotStarted --begin--> Preparing --> Ready --finish--> TearingDown --> Done
//! ```
//!
//! A setup error, or an aborting overrun, moves straight to `Done`.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};
use std::time::Duration;

use log::{debug, error};
use thiserror::Error;

use super::environment::EnvironmentError;
use super::hooks::{Deadline, SetupReport, Stage, SuiteHook, TimeoutPolicy};
use crate::config::{ConfigError, TimeoutConfig};

/// Errors raised while running suite hooks.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A hook with an aborting policy exceeded its budget.
    #[error("{stage} exceeded its {}s budget after {}ms", .budget.as_secs(), .elapsed.as_millis())]
    HookTimedOut {
        /// Stage that overran.
        stage: Stage,
        /// Budget it was given.
        budget: Duration,
        /// Time it actually took.
        elapsed: Duration,
    },
    /// A lifecycle operation was called in the wrong phase.
    #[error("cannot {action} a suite that is {phase}")]
    InvalidTransition {
        /// Operation attempted.
        action: &'static str,
        /// Phase the suite was in.
        phase: SuitePhase,
    },
    /// A custom hook failed.
    #[error("{stage} failed: {message}")]
    Hook {
        /// Stage that failed.
        stage: Stage,
        /// Failure description.
        message: String,
    },
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The environment snapshot is unusable.
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
}

/// Position of a [`Suite`] in its lifecycle.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SuitePhase {
    /// Setup has not run.
    #[default]
    NotStarted,
    /// Setup is running.
    Preparing,
    /// Setup finished; tests may run.
    Ready,
    /// Teardown is running.
    TearingDown,
    /// The suite is finished, successfully or not.
    Done,
}

impl fmt::Display for SuitePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotStarted => "not started",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::TearingDown => "tearing down",
            Self::Done => "done",
        })
    }
}

/// Budgets for each stage.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SuiteTimeouts {
    /// Setup budget.
    pub setup: Duration,
    /// Teardown budget.
    pub teardown: Duration,
}

impl SuiteTimeouts {
    /// Budget for `stage`.
    #[must_use]
    pub const fn for_stage(&self, stage: Stage) -> Duration {
        match stage {
            Stage::Setup => self.setup,
            Stage::Teardown => self.teardown,
        }
    }
}

impl From<&TimeoutConfig> for SuiteTimeouts {
    fn from(config: &TimeoutConfig) -> Self {
        Self {
            setup: config.setup(),
            teardown: config.teardown(),
        }
    }
}

impl Default for SuiteTimeouts {
    fn default() -> Self {
        Self::from(&TimeoutConfig::default())
    }
}

/// A hook bound to its budgets and current phase.
///
/// ```
/// use stockroom::testing::hooks::{SetupReport, UnitBootstrap};
/// use stockroom::testing::lifecycle::{Suite, SuitePhase, SuiteTimeouts};
///
/// let mut suite = Suite::new(UnitBootstrap::default(), SuiteTimeouts::default());
/// let ran = suite
///     .run(|report| matches!(report, SetupReport::EnvironmentInstalled { .. }))
///     .expect("unit suites cannot fail");
/// assert!(ran);
/// assert_eq!(suite.phase(), SuitePhase::Done);
/// ```
#[derive(Debug)]
pub struct Suite<H> {
    hook: H,
    timeouts: SuiteTimeouts,
    phase: SuitePhase,
    report: Option<SetupReport>,
}

impl<H: SuiteHook> Suite<H> {
    /// Binds `hook` to `timeouts`.
    #[must_use]
    pub fn new(hook: H, timeouts: SuiteTimeouts) -> Self {
        Self {
            hook,
            timeouts,
            phase: SuitePhase::NotStarted,
            report: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> SuitePhase {
        self.phase
    }

    /// Setup report, once setup has succeeded.
    #[must_use]
    pub const fn report(&self) -> Option<&SetupReport> {
        self.report.as_ref()
    }

    /// The wrapped hook.
    #[must_use]
    pub const fn hook(&self) -> &H {
        &self.hook
    }

    /// Consumes the suite, returning its hook.
    #[must_use]
    pub fn into_hook(self) -> H {
        self.hook
    }

    /// Runs setup.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::InvalidTransition`] unless the suite has not
    /// started, the hook's own error if setup fails, or
    /// [`BootstrapError::HookTimedOut`] when an aborting hook overruns. Every
    /// error leaves the suite [`SuitePhase::Done`].
    pub fn begin(&mut self) -> Result<&SetupReport, BootstrapError> {
        self.expect_phase(SuitePhase::NotStarted, "begin")?;
        self.phase = SuitePhase::Preparing;

        let deadline = self.deadline(Stage::Setup);
        let outcome = self
            .hook
            .setup(deadline)
            .and_then(|report| {
                self.enforce(Stage::Setup, deadline, report.is_degraded())
                    .map(|()| report)
            });

        match outcome {
            Ok(report) => {
                debug!("suite ready: {report}");
                self.phase = SuitePhase::Ready;
                Ok(self.report.insert(report))
            }
            Err(error) => {
                self.phase = SuitePhase::Done;
                Err(error)
            }
        }
    }

    /// Runs teardown. The suite is [`SuitePhase::Done`] afterwards whatever
    /// the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::InvalidTransition`] unless the suite is
    /// ready, the hook's own error if teardown fails, or
    /// [`BootstrapError::HookTimedOut`] when an aborting hook overruns.
    pub fn finish(&mut self) -> Result<(), BootstrapError> {
        self.expect_phase(SuitePhase::Ready, "finish")?;
        self.phase = SuitePhase::TearingDown;

        let deadline = self.deadline(Stage::Teardown);
        let outcome = self
            .hook
            .teardown(deadline)
            .and_then(|()| self.enforce(Stage::Teardown, deadline, false));

        self.phase = SuitePhase::Done;
        outcome
    }

    /// Runs setup, then `tests`, then teardown.
    ///
    /// Teardown runs even when `tests` panics; the panic resumes afterwards.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`Self::begin`] or [`Self::finish`].
    pub fn run<T, F>(&mut self, tests: F) -> Result<T, BootstrapError>
    where
        F: FnOnce(&SetupReport) -> T,
    {
        let report = self.begin()?.clone();
        let outcome = catch_unwind(AssertUnwindSafe(|| tests(&report)));
        let finished = self.finish();

        match outcome {
            Ok(value) => finished.map(|()| value),
            Err(panic) => {
                if let Err(error) = finished {
                    error!("teardown after a panicking suite failed: {error}");
                }
                resume_unwind(panic)
            }
        }
    }

    fn expect_phase(&self, expected: SuitePhase, action: &'static str) -> Result<(), BootstrapError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(BootstrapError::InvalidTransition {
                action,
                phase: self.phase,
            })
        }
    }

    fn deadline(&self, stage: Stage) -> Deadline {
        match self.hook.timeout_policy(stage) {
            TimeoutPolicy::Unbounded => Deadline::unbounded(),
            TimeoutPolicy::Tolerate | TimeoutPolicy::Abort => {
                Deadline::after(self.timeouts.for_stage(stage))
            }
        }
    }

    /// `reported` marks an overrun the hook already logged as a tolerated
    /// failure, which is then not logged again.
    fn enforce(
        &self,
        stage: Stage,
        deadline: Deadline,
        reported: bool,
    ) -> Result<(), BootstrapError> {
        if !deadline.is_expired() {
            return Ok(());
        }

        let budget = self.timeouts.for_stage(stage);
        let elapsed = deadline.elapsed();
        match self.hook.timeout_policy(stage) {
            TimeoutPolicy::Unbounded => Ok(()),
            TimeoutPolicy::Tolerate if reported => {
                debug!(
                    "{stage} overran its {}s budget; already reported",
                    budget.as_secs()
                );
                Ok(())
            }
            TimeoutPolicy::Tolerate => {
                error!(
                    "{stage} overran its {}s budget after {}ms; continuing",
                    budget.as_secs(),
                    elapsed.as_millis()
                );
                Ok(())
            }
            TimeoutPolicy::Abort => Err(BootstrapError::HookTimedOut {
                stage,
                budget,
                elapsed,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Hook whose behaviour is scripted per test.
    #[derive(Debug, Default)]
    struct ScriptedHook {
        setup_delay: Duration,
        fail_setup: bool,
        policy: TimeoutPolicy,
        teardowns: Rc<Cell<usize>>,
    }

    impl SuiteHook for ScriptedHook {
        fn setup(&mut self, _deadline: Deadline) -> Result<SetupReport, BootstrapError> {
            std::thread::sleep(self.setup_delay);
            if self.fail_setup {
                return Err(BootstrapError::Hook {
                    stage: Stage::Setup,
                    message: "scripted failure".to_owned(),
                });
            }
            Ok(SetupReport::Migrated)
        }

        fn teardown(&mut self, _deadline: Deadline) -> Result<(), BootstrapError> {
            self.teardowns.set(self.teardowns.get() + 1);
            Ok(())
        }

        fn timeout_policy(&self, _stage: Stage) -> TimeoutPolicy {
            self.policy
        }
    }

    #[fixture]
    fn tight() -> SuiteTimeouts {
        SuiteTimeouts {
            setup: Duration::from_millis(1),
            teardown: Duration::from_secs(5),
        }
    }

    #[rstest]
    fn walks_through_every_phase() {
        let mut suite = Suite::new(ScriptedHook::default(), SuiteTimeouts::default());
        assert_eq!(suite.phase(), SuitePhase::NotStarted);

        let report = suite.begin().expect("setup should succeed").clone();
        assert_eq!(report, SetupReport::Migrated);
        assert_eq!(suite.phase(), SuitePhase::Ready);
        assert_eq!(suite.report(), Some(&SetupReport::Migrated));

        suite.finish().expect("teardown should succeed");
        assert_eq!(suite.phase(), SuitePhase::Done);
        assert_eq!(suite.hook().teardowns.get(), 1);
    }

    #[rstest]
    fn rejects_out_of_order_calls() {
        let mut suite = Suite::new(ScriptedHook::default(), SuiteTimeouts::default());

        assert!(matches!(
            suite.finish(),
            Err(BootstrapError::InvalidTransition {
                action: "finish",
                phase: SuitePhase::NotStarted,
            })
        ));

        suite.begin().expect("setup should succeed");
        assert!(matches!(
            suite.begin(),
            Err(BootstrapError::InvalidTransition {
                action: "begin",
                phase: SuitePhase::Ready,
            })
        ));
    }

    #[rstest]
    fn setup_errors_end_the_suite() {
        let hook = ScriptedHook {
            fail_setup: true,
            ..ScriptedHook::default()
        };
        let mut suite = Suite::new(hook, SuiteTimeouts::default());

        let outcome = suite.begin();

        assert!(matches!(outcome, Err(BootstrapError::Hook { .. })));
        assert_eq!(suite.phase(), SuitePhase::Done);
        assert!(suite.report().is_none());
    }

    #[rstest]
    fn aborting_hooks_fail_on_overrun(tight: SuiteTimeouts) {
        let hook = ScriptedHook {
            setup_delay: Duration::from_millis(20),
            policy: TimeoutPolicy::Abort,
            ..ScriptedHook::default()
        };
        let mut suite = Suite::new(hook, tight);

        let outcome = suite.begin();

        match outcome {
            Err(BootstrapError::HookTimedOut {
                stage: Stage::Setup,
                elapsed,
                ..
            }) => assert!(
                elapsed >= Duration::from_millis(20),
                "the overrun is reported once the hook returns, after {elapsed:?}"
            ),
            other => panic!("expected a setup timeout, found {other:?}"),
        }
        assert_eq!(suite.phase(), SuitePhase::Done);
    }

    #[rstest]
    #[case(TimeoutPolicy::Tolerate)]
    #[case(TimeoutPolicy::Unbounded)]
    fn lenient_hooks_survive_overruns(tight: SuiteTimeouts, #[case] policy: TimeoutPolicy) {
        let hook = ScriptedHook {
            setup_delay: Duration::from_millis(20),
            policy,
            ..ScriptedHook::default()
        };
        let mut suite = Suite::new(hook, tight);

        let report = suite.begin().expect("overrun should be tolerated").clone();

        assert_eq!(report, SetupReport::Migrated);
        assert_eq!(suite.phase(), SuitePhase::Ready);
    }

    #[rstest]
    fn run_tears_down_after_a_panic() {
        let teardowns = Rc::new(Cell::new(0));
        let hook = ScriptedHook {
            teardowns: Rc::clone(&teardowns),
            ..ScriptedHook::default()
        };
        let mut suite = Suite::new(hook, SuiteTimeouts::default());

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            suite.run::<(), _>(|_| panic!("a test failed"))
        }));

        assert!(outcome.is_err());
        assert_eq!(teardowns.get(), 1);
        assert_eq!(suite.phase(), SuitePhase::Done);
    }

    #[rstest]
    fn run_returns_the_test_result() {
        let mut suite = Suite::new(ScriptedHook::default(), SuiteTimeouts::default());

        let value = suite
            .run(|report| report.to_string())
            .expect("suite should run");

        assert_eq!(value, "migrations applied");
        assert_eq!(suite.into_hook().teardowns.get(), 1);
    }

    #[rstest]
    fn timeouts_follow_configuration() {
        let config = TimeoutConfig {
            setup_secs: 7,
            teardown_secs: 3,
        };

        let timeouts = SuiteTimeouts::from(&config);

        assert_eq!(timeouts.for_stage(Stage::Setup), Duration::from_secs(7));
        assert_eq!(timeouts.for_stage(Stage::Teardown), Duration::from_secs(3));
    }
}
