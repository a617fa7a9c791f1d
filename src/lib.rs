//! Stockroom test bootstrap: environment snapshots, migration hooks, and the
//! suite lifecycle shared by unit and end-to-end test binaries.
//!
//! Style-class composition lives in `stockroom-common` and is re-exported
//! here as [`classes`].

pub mod config;
pub mod testing;

pub use config::{
    BootstrapConfig, CONFIG_FILE_NAME, ConfigError, MigrationConfig, TimeoutConfig,
};
pub use stockroom_common::classes;
pub use testing::environment::{EnvironmentError, TestEnvironment, unit_environment};
pub use testing::hooks::{
    Deadline, EndToEndBootstrap, SetupReport, Stage, SuiteHook, TimeoutPolicy, UnitBootstrap,
};
pub use testing::lifecycle::{BootstrapError, Suite, SuitePhase, SuiteTimeouts};
pub use testing::migration::{
    CommandOutput, CommandRunner, FailureCause, MigrationCommand, MigrationFailure, RunError,
    SystemCommandRunner,
};
