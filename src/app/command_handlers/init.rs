use crate::app::command_support::{map_config_err, split_flags};
use crate::config::{default_state_root_path, save_catalog, save_settings, Settings};
use crate::templates::{starter_catalog, StarterCatalog};
use std::fs;

/// Writes settings under `$HOME/.capsteps` and seeds a catalogue when none exists yet. An
/// existing catalogue is never overwritten.
pub fn cmd_init(args: &[String]) -> Result<String, String> {
    let (positionals, flags) = split_flags(args, &["catalog"])?;
    if let Some(extra) = positionals.first() {
        return Err(format!("unexpected argument `{extra}`; usage: init [--catalog empty|sample]"));
    }
    let kind = match flags.get("catalog") {
        Some(raw) => StarterCatalog::parse(raw)?,
        None => StarterCatalog::Sample,
    };

    let state_root = default_state_root_path().map_err(map_config_err)?;
    let settings = Settings::default_for_state_root(&state_root);
    fs::create_dir_all(&settings.projects_path).map_err(|err| {
        format!(
            "failed to create {}: {err}",
            settings.projects_path.display()
        )
    })?;

    let catalog_status = if settings.catalog_path.exists() {
        "kept"
    } else {
        let catalog = starter_catalog(kind).map_err(map_config_err)?;
        save_catalog(&settings.catalog_path, &catalog).map_err(map_config_err)?;
        kind.as_str()
    };
    let config_path = save_settings(&settings).map_err(map_config_err)?;

    Ok(format!(
        "initialized\nstate_root={}\nconfig={}\ncatalog={} ({catalog_status})\nprojects={}",
        state_root.display(),
        config_path.display(),
        settings.catalog_path.display(),
        settings.projects_path.display()
    ))
}
