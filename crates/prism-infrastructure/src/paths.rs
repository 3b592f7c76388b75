//! Platform locations for Prism's configuration and data.
//!
//! ```text
//! ~/.config/prism/            # Config directory
//! └── config.toml             # Application configuration
//!
//! ~/.local/share/prism/       # Data directory (document store root)
//! └── <product>/
//!     ├── sessions-<user>/
//!     ├── templates-<user>/
//!     └── usage-<user>/
//! ```
//!
//! `PRISM_CONFIG` overrides the config file and `PRISM_DATA_DIR` the data
//! directory.

use std::path::PathBuf;

pub const APP_DIR_NAME: &str = "prism";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const CONFIG_ENV: &str = "PRISM_CONFIG";
pub const DATA_DIR_ENV: &str = "PRISM_DATA_DIR";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

pub struct PrismPaths;

impl PrismPaths {
    /// Platform config directory joined with `prism`.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Platform data directory joined with `prism`.
    pub fn default_data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// `PRISM_CONFIG` if set, otherwise `<config_dir>/config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        match env_path(CONFIG_ENV) {
            Some(path) => Ok(path),
            None => Ok(Self::config_dir()?.join(CONFIG_FILE_NAME)),
        }
    }

    /// Data directory from the environment, if overridden.
    pub fn data_dir_override() -> Option<PathBuf> {
        env_path(DATA_DIR_ENV)
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locations_end_with_app_dir() {
        if let Ok(dir) = PrismPaths::config_dir() {
            assert!(dir.ends_with(APP_DIR_NAME));
        }
        if let Ok(dir) = PrismPaths::default_data_dir() {
            assert!(dir.ends_with(APP_DIR_NAME));
        }
    }

    #[test]
    fn test_unset_env_is_ignored() {
        assert_eq!(env_path("PRISM_TEST_VARIABLE_THAT_IS_NEVER_SET"), None);
    }
}
