//! Scripted [`CommandRunner`] for integration tests.
//!
//! Enabled by the `test-support` feature.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use super::migration::{CommandOutput, CommandRunner, MigrationCommand, RunError};

/// A command invocation observed by [`StubRunner`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordedRun {
    /// The command as requested.
    pub command: MigrationCommand,
    /// Budget passed to the runner.
    pub timeout: Option<Duration>,
}

/// Runner that replays queued results instead of spawning processes.
///
/// # Panics
///
/// [`CommandRunner::run`] panics when no result is left in the queue.
#[derive(Debug, Default)]
pub struct StubRunner {
    responses: RefCell<VecDeque<Result<CommandOutput, RunError>>>,
    runs: RefCell<Vec<RecordedRun>>,
}

impl StubRunner {
    /// Runner replaying `responses` in order.
    #[must_use]
    pub fn new(responses: Vec<Result<CommandOutput, RunError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            runs: RefCell::new(Vec::new()),
        }
    }

    /// Runner whose single run exits with status zero.
    #[must_use]
    pub fn succeeding() -> Self {
        Self::new(vec![Ok(CommandOutput::exited(0))])
    }

    /// Runner whose single run exits with `code` and prints `stderr`.
    #[must_use]
    pub fn failing(code: i32, stderr: &str) -> Self {
        Self::new(vec![Ok(CommandOutput::exited(code).with_stderr(stderr))])
    }

    /// Runner whose single run cannot find its program.
    #[must_use]
    pub fn unlaunchable(program: &str) -> Self {
        Self::new(vec![Err(RunError::Spawn {
            program: program.to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "program not found"),
        })])
    }

    /// Runner whose single run exceeds `timeout`.
    #[must_use]
    pub fn timing_out(program: &str, timeout: Duration) -> Self {
        Self::new(vec![Err(RunError::TimedOut {
            program: program.to_owned(),
            timeout,
        })])
    }

    /// Invocations observed so far.
    #[must_use]
    pub fn runs(&self) -> Vec<RecordedRun> {
        self.runs.borrow().clone()
    }

    /// Asserts that every queued result has been consumed.
    ///
    /// # Panics
    ///
    /// Panics if results remain.
    pub fn assert_finished(&self) {
        assert!(
            self.responses.borrow().is_empty(),
            "expected no further command invocations"
        );
    }
}

impl CommandRunner for StubRunner {
    fn run(
        &self,
        command: &MigrationCommand,
        timeout: Option<Duration>,
    ) -> Result<CommandOutput, RunError> {
        self.runs.borrow_mut().push(RecordedRun {
            command: command.clone(),
            timeout,
        });
        let Some(response) = self.responses.borrow_mut().pop_front() else {
            panic!("unexpected invocation of `{command}`");
        };
        response
    }
}
