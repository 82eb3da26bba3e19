use crate::app::command_support::{load_registry, load_settings, parse_id_csv};
use crate::capability::{CapabilityLookup, OTHER_CATEGORY_NAME};
use crate::shared::ids::CapabilityId;

pub fn cmd_catalog(args: &[String]) -> Result<String, String> {
    match args.first().map(String::as_str) {
        Some("list") => cmd_catalog_list(),
        Some("show") => {
            let Some(id) = args.get(1) else {
                return Err("usage: catalog show <id>".to_string());
            };
            cmd_catalog_show(id)
        }
        _ => Err("usage: catalog list|show <id>".to_string()),
    }
}

fn cmd_catalog_list() -> Result<String, String> {
    let settings = load_settings()?;
    let registry = load_registry(&settings)?;
    if registry.capabilities().is_empty() {
        return Ok("no capabilities".to_string());
    }

    let mut lines = Vec::new();
    let mut groups = registry
        .categories()
        .iter()
        .map(|category| {
            (
                category.name.clone(),
                registry.capabilities_in_category(Some(category.id.as_str())),
            )
        })
        .collect::<Vec<_>>();
    groups.push((
        OTHER_CATEGORY_NAME.to_string(),
        registry.capabilities_in_category(None),
    ));
    for (name, capabilities) in groups {
        if capabilities.is_empty() {
            continue;
        }
        lines.push(format!("{name}:"));
        for capability in capabilities {
            lines.push(format!(
                "  {:<16} {:<24} {}",
                capability.id, capability.name, capability.nature_id
            ));
        }
    }
    Ok(lines.join("\n"))
}

fn cmd_catalog_show(id: &str) -> Result<String, String> {
    let settings = load_settings()?;
    let registry = load_registry(&settings)?;
    let Some(capability) = registry.get(id) else {
        return Err(format!("unknown capability `{id}`"));
    };

    let category = capability
        .category
        .as_ref()
        .and_then(|category| {
            registry
                .categories()
                .iter()
                .find(|candidate| &candidate.id == category)
        })
        .map(|category| category.name.as_str())
        .unwrap_or(OTHER_CATEGORY_NAME);
    let mut lines = vec![
        format!("id={}", capability.id),
        format!("name={}", capability.name),
        format!("nature={}", capability.nature_id),
        format!("category={category}"),
        format!(
            "prerequisites={}",
            join_ids(registry.prerequisite_ids(capability))
        ),
        format!(
            "membership_sets={}",
            capability
                .membership_sets
                .iter()
                .map(|id| id.as_str())
                .collect::<Vec<_>>()
                .join(",")
        ),
        format!("handles={}", join_ids(&capability.handles)),
    ];
    if let Some(description) = &capability.description {
        lines.push(format!("description={description}"));
    }
    Ok(lines.join("\n"))
}

/// Validates a proposed capability set without touching any project.
pub fn cmd_validate(args: &[String]) -> Result<String, String> {
    let Some(raw) = args.first() else {
        return Err("usage: validate <ids>".to_string());
    };
    let settings = load_settings()?;
    let registry = load_registry(&settings)?;
    let ids = parse_id_csv(raw);

    let mut found = Vec::new();
    for lookup in registry.find_capabilities(&ids) {
        match lookup {
            CapabilityLookup::Found(capability) => found.push(capability),
            CapabilityLookup::Missing(_) => {
                return Err(format!("unknown capability {lookup}"));
            }
        }
    }
    registry
        .validate_capabilities(&found)
        .map_err(|err| err.to_string())?;
    Ok(format!("valid ({} capabilities)", found.len()))
}

fn join_ids(ids: &[CapabilityId]) -> String {
    ids.iter()
        .map(CapabilityId::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
