use super::paths::{
    DEFAULT_CATALOG_FILE_NAME, DEFAULT_EVENT_LOG_FILE_NAME, DEFAULT_PROJECTS_DIR_NAME,
};
use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub catalog_path: PathBuf,
    pub projects_path: PathBuf,
    #[serde(default)]
    pub event_log: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy)]
pub struct ValidationOptions {
    pub require_catalog_exists: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            require_catalog_exists: true,
        }
    }
}

impl Settings {
    /// Settings rooted under a state directory, as written by `capsteps init`.
    pub fn default_for_state_root(state_root: &Path) -> Self {
        Self {
            catalog_path: state_root.join(DEFAULT_CATALOG_FILE_NAME),
            projects_path: state_root.join(DEFAULT_PROJECTS_DIR_NAME),
            event_log: Some(state_root.join(DEFAULT_EVENT_LOG_FILE_NAME)),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self, options: ValidationOptions) -> Result<(), ConfigError> {
        if !self.catalog_path.is_absolute() {
            return Err(ConfigError::Settings(
                "`catalog_path` must be an absolute path".to_string(),
            ));
        }
        if !self.projects_path.is_absolute() {
            return Err(ConfigError::Settings(
                "`projects_path` must be an absolute path".to_string(),
            ));
        }
        if let Some(event_log) = &self.event_log {
            if !event_log.is_absolute() {
                return Err(ConfigError::Settings(
                    "`event_log` must be an absolute path".to_string(),
                ));
            }
        }
        if options.require_catalog_exists && !self.catalog_path.is_file() {
            return Err(ConfigError::Settings(format!(
                "capability catalog `{}` is missing",
                self.catalog_path.display()
            )));
        }
        Ok(())
    }
}
