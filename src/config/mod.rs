pub mod catalog_file;
pub mod error;
pub mod load;
pub mod paths;
pub mod save;
pub mod settings;

pub use catalog_file::{CapabilityConfig, CatalogFile, CategoryConfig, WizardSource};
pub use error::ConfigError;
pub use load::{load_capability_registry, load_global_settings};
pub use paths::{
    default_global_config_path, default_state_root_path, DEFAULT_CATALOG_FILE_NAME,
    DEFAULT_EVENT_LOG_FILE_NAME, DEFAULT_PROJECTS_DIR_NAME, GLOBAL_SETTINGS_FILE_NAME,
    GLOBAL_STATE_DIR,
};
pub use save::{save_catalog, save_settings};
pub use settings::{Settings, ValidationOptions};
