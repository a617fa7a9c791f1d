//! Suite bootstraps for unit and end-to-end tests.
//!
//! - [`environment`] holds the unit-test variables as an explicit value.
//! - [`migration`] runs the schema migration command.
//! - [`hooks`] defines [`SuiteHook`](hooks::SuiteHook) and the two
//!   bootstraps.
//! - [`lifecycle`] sequences setup and teardown under time budgets.
//! - [`global`] performs setup once per test binary.

pub mod environment;
pub mod global;
pub mod hooks;
pub mod lifecycle;
pub mod migration;
#[cfg(any(test, feature = "test-support"))]
pub mod stub;

#[cfg(test)]
pub(crate) static ENVIRONMENT_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
