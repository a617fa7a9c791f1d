//! Once-per-process suite setup.
//!
//! Test binaries that cannot thread a [`Suite`](super::lifecycle::Suite)
//! through every test call these helpers from each test instead. The first
//! caller performs setup; everyone else receives the same report. Nothing is
//! torn down: the environment and schema stay in place until the process
//! exits.

use log::debug;
use once_cell::sync::OnceCell;

use super::hooks::{EndToEndBootstrap, SetupReport, UnitBootstrap};
use super::lifecycle::{BootstrapError, Suite, SuiteTimeouts};
use super::migration::{CommandRunner, SystemCommandRunner};
use crate::config::BootstrapConfig;

static UNIT: OnceCell<SetupReport> = OnceCell::new();
static END_TO_END: OnceCell<SetupReport> = OnceCell::new();

/// Installs the unit-test environment once for the whole process.
///
/// Call it before spawning threads that read the environment.
pub fn ensure_unit_environment() -> &'static SetupReport {
    UNIT.get_or_init(|| {
        debug!("installing the process-wide unit-test environment");
        UnitBootstrap::default().install_for_process()
    })
}

/// Applies migrations once for the whole process using real child processes.
///
/// # Errors
///
/// Returns [`BootstrapError`] when setup fails in a way the end-to-end
/// bootstrap does not tolerate. A later call retries after a failure.
pub fn ensure_end_to_end(config: &BootstrapConfig) -> Result<&'static SetupReport, BootstrapError> {
    ensure_end_to_end_with(config, SystemCommandRunner)
}

/// Like [`ensure_end_to_end`] with a caller-supplied runner.
///
/// `runner` is ignored when setup already happened.
///
/// # Errors
///
/// Returns [`BootstrapError`] when setup fails.
pub fn ensure_end_to_end_with<R>(
    config: &BootstrapConfig,
    runner: R,
) -> Result<&'static SetupReport, BootstrapError>
where
    R: CommandRunner,
{
    END_TO_END.get_or_try_init(|| {
        let hook = EndToEndBootstrap::with_runner(config, runner);
        let mut suite = Suite::new(hook, SuiteTimeouts::from(&config.timeouts));
        suite.begin().cloned()
    })
}
