//! Bootstrap configuration read from `stockroom.toml`.
//!
//! Every field is optional. A missing file yields the defaults: a 120 second
//! setup budget, a 30 second teardown budget, and `sqlx migrate run` as the
//! migration command. Relative migration directories are resolved against the
//! directory holding the configuration file.

use std::collections::BTreeMap;
use std::io;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Deserialize;
use thiserror::Error;

/// File name looked up by [`BootstrapConfig::load`].
pub const CONFIG_FILE_NAME: &str = "stockroom.toml";

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that failed to load.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The configuration text is not valid for [`BootstrapConfig`].
    #[error("failed to parse {origin}: {source}")]
    Parse {
        /// File path, or `<inline>` for in-memory text.
        origin: String,
        /// Parser diagnostic.
        source: toml::de::Error,
    },
}

/// Settings shared by the suite bootstraps and the `stockroom` binary.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapConfig {
    /// Hook budgets.
    pub timeouts: TimeoutConfig,
    /// Migration command used by end-to-end suites.
    pub migration: MigrationConfig,
    /// Variables layered over the unit-test defaults.
    pub environment: BTreeMap<String, String>,
}

impl BootstrapConfig {
    /// Loads `dir/stockroom.toml`, falling back to defaults when it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file exists but cannot be read or
    /// parsed.
    pub fn load(dir: &Utf8Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(text) => Self::parse_file(&path, &text),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!("no {CONFIG_FILE_NAME} in {dir}; using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    /// Loads the configuration file at `path`, which must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load_from(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::parse_file(path, &text)
    }

    /// Parses configuration text without touching the file system.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use stockroom::BootstrapConfig;
    ///
    /// let config = BootstrapConfig::from_toml_str("[timeouts]\nsetup_secs = 5\n")
    ///     .expect("configuration should parse");
    /// assert_eq!(config.timeouts.setup().as_secs(), 5);
    /// assert_eq!(config.migration.program, "sqlx");
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            origin: "<inline>".to_owned(),
            source,
        })
    }

    /// Loads configuration for `dir` through the supplied loader.
    ///
    /// Tests use this to inject a stub in place of [`Self::load`].
    ///
    /// # Errors
    ///
    /// Propagates whatever the loader returns.
    pub fn load_with<F>(dir: &Utf8Path, loader: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(&Utf8Path) -> Result<Self, ConfigError>,
    {
        loader(dir)
    }

    fn parse_file(path: &Utf8Path, text: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            origin: path.to_string(),
            source,
        })?;
        if let Some(base) = path.parent() {
            config.migration.resolve_relative_to(base);
        }
        debug!("loaded bootstrap configuration from {path}");
        Ok(config)
    }
}

/// Hook budgets in whole seconds.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TimeoutConfig {
    /// Budget for suite setup.
    pub setup_secs: u64,
    /// Budget for suite teardown.
    pub teardown_secs: u64,
}

impl TimeoutConfig {
    const DEFAULT_SETUP_SECS: u64 = 120;
    const DEFAULT_TEARDOWN_SECS: u64 = 30;

    /// Setup budget.
    #[must_use]
    pub const fn setup(&self) -> Duration {
        Duration::from_secs(self.setup_secs)
    }

    /// Teardown budget.
    #[must_use]
    pub const fn teardown(&self) -> Duration {
        Duration::from_secs(self.teardown_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            setup_secs: Self::DEFAULT_SETUP_SECS,
            teardown_secs: Self::DEFAULT_TEARDOWN_SECS,
        }
    }
}

/// Migration command settings.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MigrationConfig {
    /// When `false` the end-to-end setup skips migrations entirely.
    pub enabled: bool,
    /// Executable to launch.
    pub program: String,
    /// Arguments passed to [`Self::program`].
    pub args: Vec<String>,
    /// Directory the command runs in; defaults to the current directory.
    pub working_dir: Option<Utf8PathBuf>,
}

impl MigrationConfig {
    fn resolve_relative_to(&mut self, base: &Utf8Path) {
        if let Some(dir) = self.working_dir.as_mut().filter(|dir| dir.is_relative()) {
            *dir = base.join(dir.as_path());
        }
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "sqlx".to_owned(),
            args: vec!["migrate".to_owned(), "run".to_owned()],
            working_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_match_the_documented_budgets() {
        let config = BootstrapConfig::default();

        assert_eq!(config.timeouts.setup(), Duration::from_secs(120));
        assert_eq!(config.timeouts.teardown(), Duration::from_secs(30));
        assert!(config.migration.enabled);
        assert_eq!(config.migration.program, "sqlx");
        assert_eq!(config.migration.args, ["migrate", "run"]);
        assert!(config.environment.is_empty());
    }

    #[rstest]
    fn deserialises_overrides_from_toml() {
        let source = concat!(
            "[timeouts]\n",
            "teardown_secs = 5\n",
            "[migration]\n",
            "program = \"dbmate\"\n",
            "args = [\"up\"]\n",
            "[environment]\n",
            "REDIS_PORT = \"6380\"\n",
        );

        let config = BootstrapConfig::from_toml_str(source)
            .expect("expected configuration to parse successfully");

        assert_eq!(config.timeouts.setup_secs, 120);
        assert_eq!(config.timeouts.teardown_secs, 5);
        assert_eq!(config.migration.program, "dbmate");
        assert_eq!(config.migration.args, ["up"]);
        assert_eq!(
            config.environment.get("REDIS_PORT").map(String::as_str),
            Some("6380")
        );
    }

    #[rstest]
    #[case("unexpected = true\n")]
    #[case("[timeouts]\nsetup_secs = \"soon\"\n")]
    #[case("[migration]\nshell = true\n")]
    fn rejects_invalid_documents(#[case] source: &str) {
        let outcome = BootstrapConfig::from_toml_str(source);

        assert!(
            matches!(outcome, Err(ConfigError::Parse { ref origin, .. }) if origin == "<inline>"),
            "expected a parse error, found {outcome:?}"
        );
    }

    #[rstest]
    fn resolves_relative_working_directories() {
        let mut migration = MigrationConfig {
            working_dir: Some(Utf8PathBuf::from("api")),
            ..MigrationConfig::default()
        };

        migration.resolve_relative_to(Utf8Path::new("/srv/stockroom"));

        assert_eq!(
            migration.working_dir.as_deref(),
            Some(Utf8Path::new("/srv/stockroom/api"))
        );
    }

    #[rstest]
    fn load_with_passes_through_the_requested_directory() {
        fn stub_loader(dir: &Utf8Path) -> Result<BootstrapConfig, ConfigError> {
            assert_eq!(dir.as_str(), "fixtures");
            let mut config = BootstrapConfig::default();
            config.timeouts.setup_secs = 9;
            Ok(config)
        }

        let config = BootstrapConfig::load_with(Utf8Path::new("fixtures"), stub_loader)
            .expect("stub loader should succeed");

        assert_eq!(config.timeouts.setup_secs, 9);
    }
}
