use super::{default_global_config_path, CatalogFile, ConfigError, Settings, ValidationOptions};
use crate::capability::CapabilityRegistry;

pub fn load_global_settings() -> Result<Settings, ConfigError> {
    let path = default_global_config_path()?;
    let settings = Settings::from_path(&path)?;
    settings.validate(ValidationOptions::default())?;
    Ok(settings)
}

pub fn load_capability_registry(settings: &Settings) -> Result<CapabilityRegistry, ConfigError> {
    let catalog = CatalogFile::from_path(&settings.catalog_path)?;
    CapabilityRegistry::new(catalog)
}
