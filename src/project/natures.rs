use crate::capability::{Capability, CapabilityRegistry};
use crate::shared::ids::NatureId;

/// Orders a project's nature list so every nature follows the natures of its capability's
/// prerequisites. Natures no catalogue entry claims stay at the front in their given order.
pub fn sort_nature_set(registry: &CapabilityRegistry, natures: &[NatureId]) -> Vec<NatureId> {
    let mut unknown = Vec::new();
    let mut known: Vec<&Capability> = Vec::new();
    for nature in natures {
        if unknown.contains(nature) {
            continue;
        }
        match registry.capability_for_nature(nature.as_str()) {
            Some(capability) => {
                if !known.iter().any(|seen| seen.id == capability.id) {
                    known.push(capability);
                }
            }
            None => unknown.push(nature.clone()),
        }
    }

    let mut sorted = unknown;
    sorted.extend(
        registry
            .sort_by_prerequisites(&known)
            .into_iter()
            .map(|capability| capability.nature_id.clone()),
    );
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogFile;

    fn registry() -> CapabilityRegistry {
        let catalog: CatalogFile = serde_yaml::from_str(
            r#"
capabilities:
  - id: base
    name: Base
    nature: n.base
  - id: web
    name: Web
    nature: n.web
    prerequisites: [base]
"#,
        )
        .expect("parse catalog");
        CapabilityRegistry::new(catalog).expect("registry")
    }

    fn natures(raw: &[&str]) -> Vec<NatureId> {
        raw.iter()
            .map(|nature| NatureId::parse(nature).expect("nature id"))
            .collect()
    }

    #[test]
    fn sort_nature_set_puts_prerequisites_first_and_unknown_natures_in_front() {
        let sorted = sort_nature_set(&registry(), &natures(&["n.web", "x.custom", "n.base"]));
        assert_eq!(sorted, natures(&["x.custom", "n.base", "n.web"]));
    }

    #[test]
    fn sort_nature_set_drops_repeats() {
        let sorted = sort_nature_set(&registry(), &natures(&["n.base", "n.base", "y", "y"]));
        assert_eq!(sorted, natures(&["y", "n.base"]));
    }
}
