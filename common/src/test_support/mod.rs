//! Environment guards for test harnesses.
//!
//! Edition 2024 makes environment mutation `unsafe`; [`EnvOverride`] keeps
//! the unsafe blocks and their safety argument in one place.

use std::ffi::{OsStr, OsString};

/// Overrides a single environment variable until dropped.
///
/// Dropping the guard puts back whatever value was there before, or removes
/// the variable when it was unset. Hold a process-wide lock while the guard
/// lives: the environment is shared by every test thread.
///
/// # Examples
///
/// ```ignore
/// use stockroom_common::test_support::EnvOverride;
///
/// #[test]
/// fn reads_the_test_port() {
///     let _guard = EnvOverride::set("REDIS_PORT", "6379");
///     assert_eq!(std::env::var("REDIS_PORT").as_deref(), Ok("6379"));
/// }
/// ```
#[derive(Debug)]
pub struct EnvOverride {
    key: OsString,
    previous: Option<OsString>,
}

impl EnvOverride {
    /// Sets `key` to `value`.
    #[must_use = "dropping the guard immediately restores the previous value"]
    pub fn set(key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        let key = key.as_ref().to_owned();
        let previous = std::env::var_os(&key);
        // SAFETY: callers hold the harness lock for the guard's lifetime, so
        // no other thread reads or writes the environment meanwhile.
        unsafe {
            std::env::set_var(&key, value);
        }
        Self { key, previous }
    }

    /// Unsets `key`.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use stockroom_common::test_support::EnvOverride;
    ///
    /// {
    ///     let _guard = EnvOverride::clear("APP_ENV");
    ///     assert!(std::env::var_os("APP_ENV").is_none());
    /// }
    /// ```
    #[must_use = "dropping the guard immediately restores the previous value"]
    pub fn clear(key: impl AsRef<OsStr>) -> Self {
        let key = key.as_ref().to_owned();
        let previous = std::env::var_os(&key);
        // SAFETY: as for `set`.
        unsafe {
            std::env::remove_var(&key);
        }
        Self { key, previous }
    }

    /// Name of the overridden variable.
    #[must_use]
    pub fn key(&self) -> &OsStr {
        &self.key
    }

    /// Value the variable held before the override, if any.
    #[must_use]
    pub fn previous(&self) -> Option<&OsStr> {
        self.previous.as_deref()
    }
}

impl Drop for EnvOverride {
    fn drop(&mut self) {
        if let Some(value) = &self.previous {
            // SAFETY: the harness lock is still held while the guard drops.
            unsafe {
                std::env::set_var(&self.key, value);
            }
        } else {
            // SAFETY: as above.
            unsafe {
                std::env::remove_var(&self.key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Mutex;

    static ENVIRONMENT_LOCK: Mutex<()> = Mutex::new(());

    const KEY: &str = "STOCKROOM_COMMON_ENV_OVERRIDE_TEST";

    #[rstest]
    fn set_restores_absent_variable() {
        let _lock = ENVIRONMENT_LOCK
            .lock()
            .unwrap_or_else(|error| panic!("environment lock poisoned: {error}"));
        {
            let guard = EnvOverride::set(KEY, "inner");
            assert_eq!(std::env::var(KEY).as_deref(), Ok("inner"));
            assert!(guard.previous().is_none());
        }
        assert!(std::env::var_os(KEY).is_none());
    }

    #[rstest]
    fn nested_guards_unwind_in_order() {
        let _lock = ENVIRONMENT_LOCK
            .lock()
            .unwrap_or_else(|error| panic!("environment lock poisoned: {error}"));
        let outer = EnvOverride::set(KEY, "outer");
        {
            let _inner = EnvOverride::clear(KEY);
            assert!(std::env::var_os(KEY).is_none());
        }
        assert_eq!(std::env::var(KEY).as_deref(), Ok("outer"));
        drop(outer);
        assert!(std::env::var_os(KEY).is_none());
    }
}
