use super::ConfigError;
use crate::shared::ids::{CapabilityId, CategoryId, MembershipSetId, NatureId};
use crate::shared::serde_ext::parse_id_list;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Where a capability's install or uninstall sub-wizard comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardSource {
    /// Nature-only wizard shipped with the crate: no pages, always finishable.
    Builtin,
    /// The embedding application registers a constructor for this capability.
    Host,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CapabilityConfig {
    pub id: CapabilityId,
    pub name: String,
    pub nature: NatureId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "capability_id_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub prerequisites: Vec<CapabilityId>,
    #[serde(
        default,
        deserialize_with = "membership_set_id_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub membership_sets: Vec<MembershipSetId>,
    #[serde(
        default,
        deserialize_with = "capability_id_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub handles: Vec<CapabilityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_wizard: Option<WizardSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uninstall_wizard: Option<WizardSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
    #[serde(default)]
    pub capabilities: Vec<CapabilityConfig>,
}

fn capability_id_list<'de, D>(deserializer: D) -> Result<Vec<CapabilityId>, D::Error>
where
    D: Deserializer<'de>,
{
    parse_id_list(deserializer, "capability id", CapabilityId::parse)
}

fn membership_set_id_list<'de, D>(deserializer: D) -> Result<Vec<MembershipSetId>, D::Error>
where
    D: Deserializer<'de>,
{
    parse_id_list(deserializer, "membership set id", MembershipSetId::parse)
}

impl CatalogFile {
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

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut category_ids = HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(ConfigError::Catalog(format!(
                    "category `{}` name must be non-empty",
                    category.id
                )));
            }
            if !category_ids.insert(category.id.as_str()) {
                return Err(ConfigError::Catalog(format!(
                    "duplicate category id `{}`",
                    category.id
                )));
            }
        }

        let mut capability_ids = HashSet::new();
        let mut nature_owners: HashMap<&str, &str> = HashMap::new();
        for capability in &self.capabilities {
            if capability.name.trim().is_empty() {
                return Err(ConfigError::Catalog(format!(
                    "capability `{}` name must be non-empty",
                    capability.id
                )));
            }
            if !capability_ids.insert(capability.id.as_str()) {
                return Err(ConfigError::Catalog(format!(
                    "duplicate capability id `{}`",
                    capability.id
                )));
            }
            if let Some(owner) =
                nature_owners.insert(capability.nature.as_str(), capability.id.as_str())
            {
                return Err(ConfigError::Catalog(format!(
                    "nature `{}` is claimed by both `{owner}` and `{}`",
                    capability.nature, capability.id
                )));
            }
            if let Some(category) = &capability.category {
                if !category_ids.contains(category.as_str()) {
                    return Err(ConfigError::Catalog(format!(
                        "capability `{}` references unknown category `{category}`",
                        capability.id
                    )));
                }
            }
        }

        for capability in &self.capabilities {
            for prerequisite in &capability.prerequisites {
                if prerequisite == &capability.id {
                    return Err(ConfigError::Catalog(format!(
                        "capability `{}` lists itself as a prerequisite",
                        capability.id
                    )));
                }
                if !capability_ids.contains(prerequisite.as_str()) {
                    return Err(ConfigError::Catalog(format!(
                        "capability `{}` references unknown prerequisite `{prerequisite}`",
                        capability.id
                    )));
                }
            }
            for handled in &capability.handles {
                if handled == &capability.id {
                    return Err(ConfigError::Catalog(format!(
                        "capability `{}` lists itself under `handles`",
                        capability.id
                    )));
                }
                if !capability_ids.contains(handled.as_str()) {
                    return Err(ConfigError::Catalog(format!(
                        "capability `{}` handles unknown capability `{handled}`",
                        capability.id
                    )));
                }
            }
        }

        if let Some(cycle) = self.find_cycle(|capability| capability.prerequisites.as_slice()) {
            return Err(ConfigError::Catalog(format!(
                "prerequisite cycle detected: {}",
                cycle.join(" -> ")
            )));
        }
        // Pruning drops every handled capability, so a loop would drop the whole group.
        if let Some(cycle) = self.find_cycle(|capability| capability.handles.as_slice()) {
            return Err(ConfigError::Catalog(format!(
                "handles cycle detected: {}",
                cycle.join(" -> ")
            )));
        }
        Ok(())
    }

    fn find_cycle<F>(&self, targets: F) -> Option<Vec<String>>
    where
        F: Fn(&CapabilityConfig) -> &[CapabilityId],
    {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Visiting,
            Done,
        }

        fn visit<'a>(
            id: &'a str,
            edges: &BTreeMap<&'a str, Vec<&'a str>>,
            marks: &mut HashMap<&'a str, Mark>,
            trail: &mut Vec<&'a str>,
        ) -> Option<Vec<String>> {
            match marks.get(id) {
                Some(Mark::Done) => return None,
                Some(Mark::Visiting) => {
                    let start = trail.iter().position(|entry| *entry == id).unwrap_or(0);
                    let mut cycle = trail[start..]
                        .iter()
                        .map(|entry| entry.to_string())
                        .collect::<Vec<_>>();
                    cycle.push(id.to_string());
                    return Some(cycle);
                }
                None => {}
            }
            marks.insert(id, Mark::Visiting);
            trail.push(id);
            for &next in edges.get(id).map(Vec::as_slice).unwrap_or_default() {
                if let Some(cycle) = visit(next, edges, marks, trail) {
                    return Some(cycle);
                }
            }
            trail.pop();
            marks.insert(id, Mark::Done);
            None
        }

        let edges: BTreeMap<&str, Vec<&str>> = self
            .capabilities
            .iter()
            .map(|capability| {
                (
                    capability.id.as_str(),
                    targets(capability)
                        .iter()
                        .map(CapabilityId::as_str)
                        .collect(),
                )
            })
            .collect();
        let mut marks = HashMap::new();
        for &id in edges.keys() {
            let mut trail = Vec::new();
            if let Some(cycle) = visit(id, &edges, &mut marks, &mut trail) {
                return Some(cycle);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> CatalogFile {
        serde_yaml::from_str(yaml).expect("parse catalog")
    }

    #[test]
    fn catalog_lists_accept_scalar_and_drop_repeats() {
        let catalog = parse(
            r#"
capabilities:
  - id: java
    name: Java
    nature: org.example.javanature
  - id: web
    name: Web
    nature: org.example.webnature
    prerequisites: [java, " java "]
    membership_sets: server
"#,
        );
        let web = &catalog.capabilities[1];
        assert_eq!(web.prerequisites.len(), 1);
        assert_eq!(web.prerequisites[0].as_str(), "java");
        assert_eq!(web.membership_sets[0].as_str(), "server");
        catalog.validate().expect("valid catalog");
    }

    #[test]
    fn catalog_validation_rejects_duplicate_nature_claims() {
        let catalog = parse(
            r#"
capabilities:
  - id: a
    name: A
    nature: shared.nature
  - id: b
    name: B
    nature: shared.nature
"#,
        );
        let err = catalog.validate().expect_err("duplicate nature must fail");
        assert!(err.to_string().contains("claimed by both `a` and `b`"));
    }

    #[test]
    fn catalog_validation_rejects_unknown_references() {
        let catalog = parse(
            r#"
capabilities:
  - id: a
    name: A
    nature: a.nature
    prerequisites: [ghost]
"#,
        );
        let err = catalog.validate().expect_err("dangling prerequisite must fail");
        assert!(err.to_string().contains("unknown prerequisite `ghost`"));

        let catalog = parse(
            r#"
capabilities:
  - id: a
    name: A
    nature: a.nature
    category: tools
"#,
        );
        let err = catalog.validate().expect_err("unknown category must fail");
        assert!(err.to_string().contains("unknown category `tools`"));
    }

    #[test]
    fn catalog_validation_reports_prerequisite_cycles() {
        let catalog = parse(
            r#"
capabilities:
  - id: a
    name: A
    nature: a.nature
    prerequisites: [b]
  - id: b
    name: B
    nature: b.nature
    prerequisites: [c]
  - id: c
    name: C
    nature: c.nature
    prerequisites: [a]
"#,
        );
        let err = catalog.validate().expect_err("cycle must fail");
        assert!(err
            .to_string()
            .contains("prerequisite cycle detected: a -> b -> c -> a"));
    }

    #[test]
    fn catalog_validation_reports_handles_cycles() {
        let catalog = parse(
            r#"
capabilities:
  - id: a
    name: A
    nature: a.nature
    handles: [b]
  - id: b
    name: B
    nature: b.nature
    handles: [a]
"#,
        );
        let err = catalog.validate().expect_err("mutual handles must fail");
        assert!(err.to_string().contains("handles cycle detected: a -> b -> a"));
    }

    #[test]
    fn wizard_source_uses_snake_case_and_rejects_unknown_values() {
        let capability: CapabilityConfig = serde_yaml::from_str(
            r#"
id: a
name: A
nature: a.nature
install_wizard: builtin
uninstall_wizard: host
"#,
        )
        .expect("parse capability");
        assert_eq!(capability.install_wizard, Some(WizardSource::Builtin));
        assert_eq!(capability.uninstall_wizard, Some(WizardSource::Host));

        let err = serde_yaml::from_str::<CapabilityConfig>(
            r#"
id: a
name: A
nature: a.nature
install_wizard: reflective
"#,
        )
        .expect_err("unknown wizard source must fail");
        assert!(err.to_string().contains("install_wizard"));
    }
}
