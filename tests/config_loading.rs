//! Loading `stockroom.toml` from disk.

use camino::{Utf8Path, Utf8PathBuf};
use rstest::{fixture, rstest};
use stockroom::{BootstrapConfig, CONFIG_FILE_NAME, ConfigError};
use tempfile::TempDir;

struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn write(&self, text: &str) -> Utf8PathBuf {
        let path = self.root.join(CONFIG_FILE_NAME);
        std::fs::write(&path, text).expect("configuration should be writable");
        path
    }
}

#[fixture]
fn workspace() -> Workspace {
    let dir = tempfile::tempdir().expect("temporary directory should be created");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .expect("temporary directory should be UTF-8");
    Workspace { _dir: dir, root }
}

#[rstest]
fn missing_file_yields_defaults(workspace: Workspace) {
    let config = BootstrapConfig::load(&workspace.root).expect("defaults should load");

    assert_eq!(config, BootstrapConfig::default());
}

#[rstest]
fn load_from_requires_the_file(workspace: Workspace) {
    let path = workspace.root.join(CONFIG_FILE_NAME);

    match BootstrapConfig::load_from(&path) {
        Err(ConfigError::Read { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected a read error, found {other:?}"),
    }
}

#[rstest]
fn relative_working_dirs_follow_the_file(workspace: Workspace) {
    workspace.write("[migration]\nworking_dir = \"api\"\n");

    let config = BootstrapConfig::load(&workspace.root).expect("configuration should load");

    assert_eq!(
        config.migration.working_dir.as_deref(),
        Some(workspace.root.join("api").as_path())
    );
}

#[rstest]
fn absolute_working_dirs_are_kept(workspace: Workspace) {
    workspace.write("[migration]\nworking_dir = \"/srv/api\"\n");

    let config = BootstrapConfig::load(&workspace.root).expect("configuration should load");

    assert_eq!(
        config.migration.working_dir.as_deref(),
        Some(Utf8Path::new("/srv/api"))
    );
}

#[rstest]
fn parse_errors_name_the_file(workspace: Workspace) {
    let path = workspace.write("[timeouts]\nsetup_secs = -1\n");

    match BootstrapConfig::load_from(&path) {
        Err(ConfigError::Parse { origin, .. }) => assert_eq!(origin, path.as_str()),
        other => panic!("expected a parse error, found {other:?}"),
    }
}
