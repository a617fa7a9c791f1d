//! Log behaviour of the end-to-end bootstrap.
//!
//! `logtest` installs a process-wide logger, so every assertion lives in one
//! test to keep records from different tests apart.

use std::time::Duration;

use log::Level;
use logtest::Logger;
use stockroom::testing::stub::StubRunner;
use stockroom::{
    BootstrapConfig, CommandOutput, CommandRunner, Deadline, EndToEndBootstrap, MigrationCommand,
    RunError, SetupReport, Suite, SuiteHook, SuiteTimeouts,
};

/// Runner that outlives the setup budget before reporting the timeout.
struct SlowRunner;

impl CommandRunner for SlowRunner {
    fn run(
        &self,
        command: &MigrationCommand,
        _timeout: Option<Duration>,
    ) -> Result<CommandOutput, RunError> {
        std::thread::sleep(Duration::from_millis(20));
        Err(RunError::TimedOut {
            program: command.program().to_owned(),
            timeout: Duration::from_millis(1),
        })
    }
}

fn diagnostics(logger: &mut Logger) -> Vec<(Level, String)> {
    let mut records = Vec::new();
    while let Some(record) = logger.pop() {
        if record.level() <= Level::Warn {
            records.push((record.level(), record.args().to_string()));
        }
    }
    records
}

#[test]
fn only_tolerated_failures_produce_diagnostics() {
    let mut logger = Logger::start();
    let config = BootstrapConfig::default();

    let mut succeeding = EndToEndBootstrap::with_runner(&config, StubRunner::succeeding());
    let report = succeeding
        .setup(Deadline::unbounded())
        .expect("successful migrations should not fail setup");
    assert_eq!(report, SetupReport::Migrated);
    assert!(
        diagnostics(&mut logger).is_empty(),
        "successful migrations must not log warnings or errors"
    );

    let runner = StubRunner::failing(1, "error: relation \"stock_items\" already exists");
    let mut failing = EndToEndBootstrap::with_runner(&config, runner);
    let report = failing
        .setup(Deadline::unbounded())
        .expect("failed migrations are tolerated");
    assert!(report.is_degraded());
    failing.runner().assert_finished();

    let records = diagnostics(&mut logger);
    assert_eq!(records.len(), 1, "expected one diagnostic, found {records:?}");
    let Some((level, message)) = records.first() else {
        panic!("expected an error record for the failed migration");
    };
    assert_eq!(*level, Level::Error);
    assert!(
        message.contains("relation \"stock_items\" already exists"),
        "the log record should carry the original failure detail: {message}"
    );
    assert!(message.contains("sqlx migrate run"), "{message}");

    let hook = EndToEndBootstrap::with_runner(&config, SlowRunner);
    let timeouts = SuiteTimeouts {
        setup: Duration::from_millis(1),
        teardown: Duration::from_secs(5),
    };
    let mut suite = Suite::new(hook, timeouts);
    let report = suite
        .begin()
        .expect("timed-out migrations are tolerated")
        .clone();
    assert!(report.is_degraded());

    let records = diagnostics(&mut logger);
    assert_eq!(
        records.len(),
        1,
        "a timed-out migration should be reported once, found {records:?}"
    );
    assert!(
        records
            .first()
            .is_some_and(|(_, message)| message.contains("timed out")),
        "{records:?}"
    );
}
