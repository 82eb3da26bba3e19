use super::validation::{validate_capability_set, CapabilityValidationError};
use super::{Capability, Category};
use crate::config::{CatalogFile, ConfigError};
use crate::shared::ids::{CapabilityId, MembershipSetId, NatureId};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Result of resolving one id against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityLookup<'a> {
    Found(&'a Capability),
    /// The raw id (or nature id) that did not resolve.
    Missing(&'a str),
}

impl<'a> CapabilityLookup<'a> {
    pub fn found(self) -> Option<&'a Capability> {
        match self {
            CapabilityLookup::Found(capability) => Some(capability),
            CapabilityLookup::Missing(_) => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, CapabilityLookup::Missing(_))
    }
}

impl std::fmt::Display for CapabilityLookup<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapabilityLookup::Found(capability) => capability.name.fmt(f),
            CapabilityLookup::Missing(raw) => write!(f, "<{raw}>"),
        }
    }
}

/// Read-only catalogue of every known capability. Built once and passed by reference.
#[derive(Debug, Clone)]
pub struct CapabilityRegistry {
    capabilities: Vec<Capability>,
    categories: Vec<Category>,
    by_id: HashMap<CapabilityId, usize>,
    by_nature: HashMap<NatureId, usize>,
}

impl CapabilityRegistry {
    pub fn new(catalog: CatalogFile) -> Result<Self, ConfigError> {
        catalog.validate()?;

        let categories = catalog
            .categories
            .into_iter()
            .map(Category::from)
            .collect::<Vec<_>>();
        let capabilities = catalog
            .capabilities
            .into_iter()
            .map(Capability::from)
            .collect::<Vec<_>>();
        let by_id = capabilities
            .iter()
            .enumerate()
            .map(|(index, capability)| (capability.id.clone(), index))
            .collect();
        let by_nature = capabilities
            .iter()
            .enumerate()
            .map(|(index, capability)| (capability.nature_id.clone(), index))
            .collect();

        Ok(Self {
            capabilities,
            categories,
            by_id,
            by_nature,
        })
    }

    pub fn from_catalog_file(path: &Path) -> Result<Self, ConfigError> {
        Self::new(CatalogFile::from_path(path)?)
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Capabilities filed under `category`, or those without a category when `None`.
    pub fn capabilities_in_category(&self, category: Option<&str>) -> Vec<&Capability> {
        self.capabilities
            .iter()
            .filter(|capability| capability.category.as_ref().map(|id| id.as_str()) == category)
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Capability> {
        self.by_id.get(id).map(|index| &self.capabilities[*index])
    }

    pub fn capability_for_nature(&self, nature_id: &str) -> Option<&Capability> {
        self.by_nature
            .get(nature_id)
            .map(|index| &self.capabilities[*index])
    }

    pub fn prerequisite_ids<'a>(&self, capability: &'a Capability) -> &'a [CapabilityId] {
        &capability.prerequisites
    }

    pub fn membership_set_ids<'a>(&self, capability: &'a Capability) -> &'a [MembershipSetId] {
        &capability.membership_sets
    }

    pub fn find_capabilities<'a, S>(&'a self, ids: &'a [S]) -> Vec<CapabilityLookup<'a>>
    where
        S: AsRef<str>,
    {
        ids.iter()
            .map(|raw| {
                let raw = raw.as_ref();
                match self.get(raw) {
                    Some(capability) => CapabilityLookup::Found(capability),
                    None => CapabilityLookup::Missing(raw),
                }
            })
            .collect()
    }

    pub fn capabilities_for_natures<'a, S>(&'a self, natures: &'a [S]) -> Vec<CapabilityLookup<'a>>
    where
        S: AsRef<str>,
    {
        natures
            .iter()
            .map(|raw| {
                let raw = raw.as_ref();
                match self.capability_for_nature(raw) {
                    Some(capability) => CapabilityLookup::Found(capability),
                    None => CapabilityLookup::Missing(raw),
                }
            })
            .collect()
    }

    pub fn validate_capabilities(
        &self,
        set: &[&Capability],
    ) -> Result<(), CapabilityValidationError> {
        validate_capability_set(set)
    }

    /// Minimal add-set for `requested`: repeats and capabilities whose UI another requested
    /// capability handles are dropped, then prerequisites are moved ahead of their dependents.
    pub fn prune_capabilities<'a>(&self, requested: &[&'a Capability]) -> Vec<&'a Capability> {
        let mut seen = HashSet::new();
        let mut kept: Vec<&'a Capability> = Vec::new();
        for capability in requested.iter().copied() {
            if seen.insert(capability.id.as_str()) {
                kept.push(capability);
            }
        }

        let handled: HashSet<&str> = kept
            .iter()
            .flat_map(|capability| capability.handles.iter().map(CapabilityId::as_str))
            .collect();
        kept.retain(|capability| !handled.contains(capability.id.as_str()));

        self.sort_by_prerequisites(&kept)
    }

    /// Stable ordering in which every capability follows those of its prerequisites (direct or
    /// transitive) that are also in `capabilities`. Already ordered input comes back unchanged.
    pub fn sort_by_prerequisites<'a>(&self, capabilities: &[&'a Capability]) -> Vec<&'a Capability> {
        let present: HashSet<&str> = capabilities
            .iter()
            .map(|capability| capability.id.as_str())
            .collect();
        let required = capabilities
            .iter()
            .map(|capability| self.transitive_prerequisites(capability))
            .collect::<Vec<_>>();
        let mut emitted: HashSet<&str> = HashSet::new();
        let mut pending = capabilities.iter().copied().zip(required).collect::<Vec<_>>();
        let mut sorted = Vec::with_capacity(pending.len());

        while !pending.is_empty() {
            let ready = pending.iter().position(|(capability, required)| {
                required.iter().all(|prerequisite| {
                    !present.contains(prerequisite)
                        || emitted.contains(prerequisite)
                        || *prerequisite == capability.id.as_str()
                })
            });
            // A cycle cannot come from a validated catalog; keep input order if one slips in.
            let index = ready.unwrap_or(0);
            let (capability, _) = pending.remove(index);
            emitted.insert(capability.id.as_str());
            sorted.push(capability);
        }
        sorted
    }

    /// Whether `capability` needs `id`, directly or through other prerequisites.
    pub fn requires_transitively(&self, capability: &Capability, id: &str) -> bool {
        self.transitive_prerequisites(capability).contains(id)
    }

    fn transitive_prerequisites<'s>(&'s self, capability: &'s Capability) -> HashSet<&'s str> {
        let mut seen = HashSet::new();
        let mut stack = capability
            .prerequisites
            .iter()
            .map(CapabilityId::as_str)
            .collect::<Vec<_>>();
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(prerequisite) = self.get(id) {
                stack.extend(prerequisite.prerequisites.iter().map(CapabilityId::as_str));
            }
        }
        seen
    }

    /// Members of `within` that declare `id` as a prerequisite.
    pub fn dependents_of<'a>(&self, id: &str, within: &[&'a Capability]) -> Vec<&'a Capability> {
        within
            .iter()
            .copied()
            .filter(|capability| capability.requires(id))
            .collect()
    }
}
