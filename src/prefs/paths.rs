// Preference path utilities.
// Resolves platform directories for config, persisted flags, and log files.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const APP_NAME: &str = "kpidash";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Get the base data directory (~/.local/share/kpidash on Linux).
///
/// An explicit override from the settings wins over the platform default.
pub fn data_dir(override_dir: Option<&Path>) -> Option<PathBuf> {
    match override_dir {
        Some(dir) => Some(dir.to_path_buf()),
        None => project_dirs().map(|dirs| dirs.data_dir().to_path_buf()),
    }
}

/// Path to the user configuration file.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Path to the persisted flag store.
pub fn prefs_path(override_dir: Option<&Path>) -> Option<PathBuf> {
    data_dir(override_dir).map(|dir| dir.join("prefs.json"))
}

/// Directory holding log files.
pub fn log_dir(override_dir: Option<&Path>) -> Option<PathBuf> {
    data_dir(override_dir).map(|dir| dir.join("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_paths() {
        let base = Path::new("/tmp/kpidash-test");

        assert_eq!(data_dir(Some(base)).unwrap(), base);
        assert!(
            prefs_path(Some(base))
                .unwrap()
                .ends_with("kpidash-test/prefs.json")
        );
        assert!(log_dir(Some(base)).unwrap().ends_with("kpidash-test/logs"));
    }

    #[test]
    fn test_config_path_name() {
        // No home directory in some CI sandboxes
        if let Some(path) = config_path() {
            assert!(path.ends_with("config.toml"));
        }
    }
}
