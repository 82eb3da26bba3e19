use super::{default_global_config_path, CatalogFile, ConfigError, Settings, ValidationOptions};
use crate::shared::fs_atomic::atomic_write_file;
use std::fs;
use std::path::{Path, PathBuf};

fn create_parent_dir(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

fn write_yaml<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    create_parent_dir(path)?;
    let body = serde_yaml::to_string(value).map_err(|source| ConfigError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write_file(path, body.as_bytes()).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_settings(settings: &Settings) -> Result<PathBuf, ConfigError> {
    settings.validate(ValidationOptions {
        require_catalog_exists: false,
    })?;

    let path = default_global_config_path()?;
    write_yaml(&path, settings)?;
    Ok(path)
}

pub fn save_catalog(path: &Path, catalog: &CatalogFile) -> Result<(), ConfigError> {
    catalog.validate()?;
    write_yaml(path, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct HomeGuard {
        old_home: Option<std::ffi::OsString>,
    }

    impl HomeGuard {
        fn set(home: &Path) -> Self {
            let old_home = std::env::var_os("HOME");
            std::env::set_var("HOME", home);
            Self { old_home }
        }
    }

    impl Drop for HomeGuard {
        fn drop(&mut self) {
            if let Some(old_home) = self.old_home.take() {
                std::env::set_var("HOME", old_home);
            } else {
                std::env::remove_var("HOME");
            }
        }
    }

    #[test]
    fn save_settings_writes_under_home_state_dir_and_loads_back() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
        let temp = tempdir().expect("tempdir");
        let _home_guard = HomeGuard::set(temp.path());

        let state_root = temp.path().join(".capsteps");
        let settings = Settings::default_for_state_root(&state_root);
        let path = save_settings(&settings).expect("save settings");
        assert_eq!(path, state_root.join("config.yaml"));

        save_catalog(&settings.catalog_path, &CatalogFile::default()).expect("save catalog");
        let loaded = super::super::load_global_settings().expect("load settings");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn save_catalog_refuses_inconsistent_catalog() {
        let temp = tempdir().expect("tempdir");
        let catalog: CatalogFile = serde_yaml::from_str(
            r#"
capabilities:
  - id: a
    name: A
    nature: a.nature
    handles: [a]
"#,
        )
        .expect("parse catalog");

        let path = temp.path().join("capabilities.yaml");
        let err = save_catalog(&path, &catalog).expect_err("self handle must fail");
        assert!(err.to_string().contains("lists itself under `handles`"));
        assert!(!path.exists());
    }
}
